pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::record_builder::*;

pub mod record_builder {

    use super::*;
    use crate::{address::fields::*, record::*};

    #[derive(Debug)]
    pub struct RecordBuild {
        record: Record,
    }

    impl RecordBuild {
        pub fn key(mut self, kind: &str, name: &str) -> Self {
            self.record.key = Some(Key {
                partition: PartitionId::default(),
                path: vec![PathElement {
                    kind: kind.into(),
                    id: Some(KeyId::Name(name.into())),
                }],
            });
            self
        }
        pub fn line1(self, line1: &str) -> Self {
            self.property(LINE1, line1)
        }
        pub fn city(self, city: &str) -> Self {
            self.property(CITY, city)
        }
        pub fn state(self, state: &str) -> Self {
            self.property(STATE, state)
        }
        pub fn zip(self, zip: &str) -> Self {
            self.property(ZIP, zip)
        }
        pub fn address(self, line1: &str, city: &str, state: &str, zip: &str) -> Self {
            self.line1(line1).city(city).state(state).zip(zip)
        }
        pub fn property(mut self, name: &str, value: impl Into<Value>) -> Self {
            self.record.set(name, value.into());
            self
        }
        pub fn finish(self) -> Record {
            self.record
        }
    }

    impl Builder for Record {
        type Build = RecordBuild;
        fn build() -> Self::Build {
            Self::Build {
                record: Record::default(),
            }
        }
    }
}
