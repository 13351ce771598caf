//! Core domain for ThriftLife: donations and their status timeline, the thrift
//! catalog filter, the shopping cart, impact statistics, and the ports the
//! backend and client plug into. No I/O lives here.

pub mod cart;
pub mod catalog;
pub mod domain;
pub mod impact;
pub mod ports;
pub mod tracking;
pub mod validation;

pub use cart::{Cart, CartEntry};
pub use catalog::CatalogFilter;
pub use domain::{
    ClothingCategory, ClothingCondition, Donation, DonationStatus, ImpactStats, NewDonation,
    NewThriftItem, NewUser, Size, ThriftItem, TrackingId, User,
};
pub use impact::{CountUp, Headline, HeadlineFrame};
pub use ports::{DatabaseService, PortError, PortResult, ThriftBackend};
pub use tracking::{compute_timeline, TimelineStep};
pub use validation::ValidationError;
