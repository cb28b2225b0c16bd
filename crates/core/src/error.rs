use thiserror::Error;

use crate::model::{CatalogError, CheckoutLinkError, IdError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Checkout(#[from] CheckoutLinkError),
    #[error(transparent)]
    Id(#[from] IdError),
}
