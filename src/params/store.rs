//! Parameter Store
//!
//! Keeps the decoded parameters in step with the navigation location. Updates
//! merge, encode, and push exactly one history entry; back/forward re-decode
//! the location as a plain state replacement. Moves made directly on the
//! navigation handle are picked up by `refresh`.

use super::navigation::Navigation;
use super::{ParamUpdate, TableParams};
use crate::error::ApiError;
use tracing::{debug, info};

pub struct ParamStore<N> {
    navigation: N,
    params: TableParams,
    /// Location `params` was decoded from
    decoded_from: String,
}

impl<N: Navigation> ParamStore<N> {
    /// Decode initial parameters from the current location.
    pub fn new(navigation: N) -> Self {
        let decoded_from = navigation.location();
        let params = TableParams::from_query(&decoded_from);
        Self {
            navigation,
            params,
            decoded_from,
        }
    }

    pub fn params(&self) -> &TableParams {
        &self.params
    }

    pub fn location(&self) -> String {
        self.navigation.location()
    }

    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut N {
        &mut self.navigation
    }

    /// Merge `update`, push the encoded location, and adopt the merged state.
    pub fn update(&mut self, update: ParamUpdate) -> Result<&TableParams, ApiError> {
        let next = self.params.merged(update);
        let query = next.encode_over(&self.navigation.location());
        self.navigation.push(query.clone())?;
        info!(query = %query, "Pushed table parameters");
        self.params = next;
        self.decoded_from = self.navigation.location();
        Ok(&self.params)
    }

    /// Re-decode from the current location without pushing.
    pub fn resync(&mut self) -> &TableParams {
        self.decoded_from = self.navigation.location();
        self.params = TableParams::from_query(&self.decoded_from);
        &self.params
    }

    /// Re-decode only if the location moved since the last decode.
    /// Returns true if the parameters were replaced.
    pub fn refresh(&mut self) -> bool {
        if self.navigation.location() == self.decoded_from {
            return false;
        }
        self.resync();
        debug!(query = %self.decoded_from, "Location changed outside the store");
        true
    }

    pub fn back(&mut self) -> Result<bool, ApiError> {
        let moved = self.navigation.back()?;
        if moved {
            self.resync();
            info!(query = %self.navigation.location(), "Navigated back");
        }
        Ok(moved)
    }

    pub fn forward(&mut self) -> Result<bool, ApiError> {
        let moved = self.navigation.forward()?;
        if moved {
            self.resync();
            info!(query = %self.navigation.location(), "Navigated forward");
        }
        Ok(moved)
    }
}
