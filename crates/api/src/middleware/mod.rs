pub mod internal;

pub use internal::InternalAuth;
