// Domain layer: contact models and the mail-sending port. No transport code here.

pub mod model;
pub mod ports;
