use dioxus::prelude::*;
use services::{GameLoopError, ImageLoadError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    CatalogLoad,
    EmptyCatalog,
    ImageLoad,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::CatalogLoad => "Could not load the skin catalog. Check the connection and try again.",
            ViewError::EmptyCatalog => "The catalog has no skins yet. Import a catalog to play.",
            ViewError::ImageLoad => "Image unavailable",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&GameLoopError> for ViewError {
    fn from(err: &GameLoopError) -> Self {
        match err {
            GameLoopError::CatalogLoad(_) => ViewError::CatalogLoad,
            GameLoopError::EmptyCatalog => ViewError::EmptyCatalog,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&ImageLoadError> for ViewError {
    fn from(_: &ImageLoadError) -> Self {
        ViewError::ImageLoad
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::MosaicVm;
    use storage::repository::StorageError;

    #[test]
    fn maps_game_loop_errors() {
        let load = GameLoopError::CatalogLoad(StorageError::Connection("down".into()));
        assert_eq!(ViewError::from(&load), ViewError::CatalogLoad);
        assert_eq!(
            ViewError::from(&GameLoopError::EmptyCatalog),
            ViewError::EmptyCatalog
        );
        assert_eq!(ViewError::from(&GameLoopError::Closed), ViewError::Unknown);
        assert_ne!(
            ViewError::EmptyCatalog.message(),
            ViewError::CatalogLoad.message()
        );
    }

    #[test]
    fn image_failures_have_their_own_error() {
        let missing = ImageLoadError::Io(std::io::ErrorKind::NotFound.into());
        let err = ViewError::from(&missing);
        assert_eq!(err, ViewError::ImageLoad);
        assert_eq!(err.message(), MosaicVm::Unavailable.placeholder().unwrap_or_default());
    }
}
