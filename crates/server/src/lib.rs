pub mod routes;
pub mod startup;
pub mod forms;
pub mod errors;

pub use startup::run;
