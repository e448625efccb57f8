pub mod login;
pub mod register;

pub use login::LoginCommand;
pub use register::RegisterCommand;

use crate::validation::Rules;

pub(crate) const EMAIL_MAX: usize = 256;
pub(crate) const PASSWORD_MIN: usize = 8;
pub(crate) const PASSWORD_MAX: usize = 128;

fn email_rules(rules: &mut Rules, email: &str) {
    rules
        .required("Email", email)
        .email(email)
        .max_len("Email", email, EMAIL_MAX);
}
