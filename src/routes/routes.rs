use crate::routes::{otp::otp_route, util::util_route};
use actix_web::web;

pub fn main_route(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/otp").configure(otp_route))
        .service(web::scope("/utils").configure(util_route));
}
