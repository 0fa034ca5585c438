pub(crate) mod handlers;
mod routes;

pub use routes::util_route;
