pub mod logging;
pub mod spelling;
