use thatnightsky_core::error::Result;
use thatnightsky_core::models::Catalogue;

/// Port for catalogue loading
///
/// Implementations do blocking work; callers cache the result rather than
/// loading per request.
pub trait CatalogueSource: Send + Sync {
    /// Load the full catalogue with its constellation segments
    fn load(&self) -> Result<Catalogue>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}

impl<T: CatalogueSource + ?Sized> CatalogueSource for &T {
    fn load(&self) -> Result<Catalogue> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
