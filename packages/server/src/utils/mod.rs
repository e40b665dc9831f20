pub mod hash;
pub mod jwt;
pub mod lookup;
pub mod revocation;
