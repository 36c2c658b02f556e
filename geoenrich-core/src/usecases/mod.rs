mod build_address;
mod enrich_record;
mod error;

#[cfg(test)]
pub mod tests;

pub use self::{build_address::*, enrich_record::*, error::Error};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, gateways::geocode::*};
}
