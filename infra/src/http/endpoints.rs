//! Backend paths, relative to the configured base URL

pub const IS_USER_REGISTERED: &str = "/api/auth/is-user-registered";
pub const REGISTER: &str = "/api/auth/register";
pub const VERIFY_ACCOUNT: &str = "/api/auth/verify-account";
pub const SEND_VERIFY_OTP: &str = "/api/auth/send-verify-otp";
pub const LOGIN: &str = "/api/auth/login";
pub const LOGOUT: &str = "/api/auth/logout";
pub const SEND_RESET_OTP: &str = "/api/auth/send-reset-otp";
pub const RESET_PASSWORD: &str = "/api/auth/reset-password";
pub const IS_AUTH: &str = "/api/auth/is-auth";

pub const USER_DATA: &str = "/api/user/data";
pub const PROFILE: &str = "/api/user/profile";
pub const UPDATE_PROFILE: &str = "/api/user/update-profile";
pub const NIC_INFO: &str = "/api/user/nic-info";
pub const NIC_UPLOAD: &str = "/api/user/nic-upload";
pub const ENROLLED_COURSES: &str = "/api/user/enrolled-courses";
pub const PAYMENT_HISTORY: &str = "/api/user/payment-history";
pub const ALL_CATEGORIES: &str = "/api/user/all-categories";
pub const BANK_SLIP: &str = "/api/user/payment/bankslip";

pub const ALL_COURSES: &str = "/api/course/all";

/// `GET /api/course/:id`
pub fn course(id: &str) -> String {
    format!("/api/course/{}", id)
}
