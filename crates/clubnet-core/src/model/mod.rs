//! Domain records
//!
//! Read-side records (`User`, `Club`, `Event`, ...) mirror one query
//! projection each, aggregates included. Write-side inputs (`NewUser`,
//! `NewClub`, ...) carry only caller-supplied fields and validate them.

pub mod club;
pub mod event;
pub mod friend;
pub mod media;
pub mod review;
pub mod user;

pub use club::{Club, ClubId, NewClub};
pub use event::{Attendance, AttendanceStatus, Event, EventId, NewEvent};
pub use friend::{EdgeDirection, FriendEdge, FriendLink, FriendStatus};
pub use media::{Media, MediaId, MediaType, NewMedia};
pub use review::{NewReview, Review, ReviewId, ReviewWithAuthor};
pub use user::{NewUser, User, UserId, UserProfileUpdate};

/// Closed set of lowercase text values stored in a CHECK-constrained column
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Text stored in the database column
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::errors::ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err($crate::errors::ModelError::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub(crate) use text_enum;
