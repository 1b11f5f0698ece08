//! Worker and job identifiers.
//!
//! Both are plain newtypes (`Copy + Ord + Hash`) so they can key the request
//! de-duplication set and be logged with `%`.

use std::fmt;

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident: $repr:ty) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $repr);

        impl $name {
            /// Placeholder for "not assigned yet".
            pub const INVALID: $name = $name(<$repr>::MAX);

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))?;
                write!(f, "({})", self.0)
            }
        }
    };
}

id_newtype! {
    /// Identifies one worker in the colony.
    AgentId: u32
}

id_newtype! {
    /// Sequence number the executor hands out per submitted job.
    JobId: u64
}
