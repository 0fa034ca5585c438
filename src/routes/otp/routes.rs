use actix_web::web;

use super::handlers::{send_otp, verify_otp};

pub fn otp_route(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/send").route(web::post().to(send_otp)));
    cfg.service(web::resource("/verify").route(web::post().to(verify_otp)));
}
