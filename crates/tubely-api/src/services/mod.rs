pub mod presign;

pub use presign::PresignedAccessIssuer;
