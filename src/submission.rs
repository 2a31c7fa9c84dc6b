use crate::error::{SubmitError, ValidationError};
use crate::models::{CommunityRecord, RequiredField};
use crate::storage::Store;
use crate::utils::split_entries;
use log::{info, warn};

/// Form contents exactly as typed. `offers` and `needs` hold one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSubmission {
    pub name: String,
    pub location: String,
    pub description: String,
    pub offers: String,
    pub needs: String,
}

impl RawSubmission {
    pub fn validate(&self) -> Result<CommunityRecord, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingRequiredField(RequiredField::Name));
        }
        let location = self.location.trim();
        if location.is_empty() {
            return Err(ValidationError::MissingRequiredField(RequiredField::Location));
        }
        Ok(CommunityRecord {
            name: name.to_string(),
            location: location.to_string(),
            description: self.description.trim().to_string(),
            offers: split_entries(&self.offers),
            needs: split_entries(&self.needs),
        })
    }
}

/// Validate `draft`, persist `records` with the new entry appended, and only
/// then append it in memory. On any error `records` is left untouched.
pub fn submit(
    store: &Store,
    records: &mut Vec<CommunityRecord>,
    draft: &RawSubmission,
) -> Result<CommunityRecord, SubmitError> {
    let record = draft.validate().map_err(|e| {
        info!("rejected submission: {}", e);
        e
    })?;

    let mut next = Vec::with_capacity(records.len() + 1);
    next.extend_from_slice(records);
    next.push(record.clone());

    if let Err(e) = store.save(&next) {
        warn!("could not save {:?}: {}", record.name, e);
        return Err(e.into());
    }

    info!("added community {:?} ({})", record.name, record.location);
    *records = next;
    Ok(record)
}
