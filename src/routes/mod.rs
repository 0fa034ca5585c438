pub(crate) mod otp;
mod routes;
pub(crate) mod util;

pub use routes::main_route;
