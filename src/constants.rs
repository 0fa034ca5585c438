use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref OTP_PATTERN: Regex =
        Regex::new(r"^[0-9]{6}$").expect("Failed to compile regex pattern");
}

pub const OTP_EMAIL_SUBJECT: &str = "Your password reset code";
