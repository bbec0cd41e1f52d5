pub mod catalogue;
pub mod observer;
pub mod query;
pub mod sky;

pub use catalogue::{Catalogue, CatalogueStar, ConstellationLine, StarId};
pub use observer::ObserverContext;
pub use query::{Lang, QueryInput};
pub use sky::{ConstellationPosition, ProjectedLine, SkyData, StarRecord};
