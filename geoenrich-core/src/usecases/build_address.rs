use super::prelude::*;

/// Derive the postal address of a business location.
///
/// Missing attributes don't fail: they end up as
/// [`ABSENT_PLACEHOLDER`] in the rendered address.
pub fn build_address(record: &Record) -> Address {
    Address {
        line1: address_part(record, fields::LINE1),
        city: address_part(record, fields::CITY),
        state: address_part(record, fields::STATE),
        zip: address_part(record, fields::ZIP),
    }
}

fn address_part(record: &Record, name: &str) -> AddressPart {
    record
        .get(name)
        .and_then(Value::scalar_text)
        .into()
}
