use std::fmt;

/// Textual stand-in for a component without a value.
///
/// Absent components are rendered verbatim into the address string
/// instead of being skipped.
pub const ABSENT_PLACEHOLDER: &str = "null";

/// Record attributes that make up the postal address of a business location.
pub mod fields {
    pub const LINE1: &str = "provider_first_line_business_practice_location_address";
    pub const CITY: &str = "provider_business_practice_location_address_city_name";
    pub const STATE: &str = "provider_business_practice_location_address_state_name";
    pub const ZIP: &str = "provider_business_practice_location_address_postal_code";
}

/// One component of a postal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressPart {
    Present(String),
    Absent,
}

impl AddressPart {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Present(s) => s,
            Self::Absent => ABSENT_PLACEHOLDER,
        }
    }
}

impl From<Option<String>> for AddressPart {
    fn from(from: Option<String>) -> Self {
        from.map(Self::Present).unwrap_or(Self::Absent)
    }
}

impl fmt::Display for AddressPart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A free-text postal address of a business location.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub line1 : AddressPart,
    pub city  : AddressPart,
    pub state : AddressPart,
    pub zip   : AddressPart,
}

impl Address {
    pub fn is_complete(&self) -> bool {
        self.parts().iter().all(|(_, p)| !p.is_absent())
    }

    /// Record attribute names of all absent components in address order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.parts()
            .into_iter()
            .filter(|(_, p)| p.is_absent())
            .map(|(name, _)| name)
            .collect()
    }

    fn parts(&self) -> [(&'static str, &AddressPart); 4] {
        [
            (fields::LINE1, &self.line1),
            (fields::CITY, &self.city),
            (fields::STATE, &self.state),
            (fields::ZIP, &self.zip),
        ]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self {
            line1,
            city,
            state,
            zip,
        } = self;
        write!(f, "{line1}, {city}, {state} {zip}")
    }
}
