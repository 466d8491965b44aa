pub mod admin;
pub mod car;
pub mod contact;
pub mod inquiry;

pub use admin::{AdminCredentials, AdminLogin};
pub use car::{Car, CarCreate, CarFilter, CarStats, CarStatus, CarUpdate};
pub use contact::{ContactMessage, ContactMessageCreate};
pub use inquiry::{Inquiry, InquiryCreate, InquiryStats, InquiryStatus};
