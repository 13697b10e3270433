/// Declares a v4-uuid identifier. `Default` generates a fresh id.
#[macro_export]
macro_rules! uuid_key {
    ($TypeName: ident) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $TypeName(uuid::Uuid);

        impl $TypeName {
            pub fn new() -> Self {
                $TypeName(uuid::Uuid::new_v4())
            }

            pub fn inner(&self) -> uuid::Uuid {
                self.0
            }
        }

        impl Default for $TypeName {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::str::FromStr for $TypeName {
            type Err = uuid::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(value).map($TypeName)
            }
        }

        impl std::fmt::Display for $TypeName {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<uuid::Uuid> for $TypeName {
            fn from(id: uuid::Uuid) -> Self {
                $TypeName(id)
            }
        }

        impl From<$TypeName> for uuid::Uuid {
            fn from(id: $TypeName) -> Self {
                id.inner()
            }
        }
    };
}
