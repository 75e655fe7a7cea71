//! Request validation.
//!
//! Every check runs before the first remote call and reports the offending
//! flag by name.

use crate::error::Error;

use super::config::{
    AssignmentRequest, FieldPermissionRequest, ObjectPermissionRequest,
    RecordTypeVisibilityRequest,
};

fn validate_profiles(profiles: &[String]) -> Result<(), Error> {
    if profiles.is_empty() {
        return Err(Error::validation(
            "at least one profile pattern must be specified",
        ));
    }
    Ok(())
}

fn validate_chunk_size(chunk_size: usize) -> Result<(), Error> {
    if chunk_size == 0 {
        return Err(Error::validation("chunk size must be at least 1"));
    }
    Ok(())
}

pub fn validate_field_request(request: &FieldPermissionRequest) -> Result<(), Error> {
    validate_profiles(&request.profiles)?;
    if request.fields.iter().all(|f| f.trim().is_empty()) {
        return Err(Error::validation(
            "at least one field name must be specified",
        ));
    }
    validate_chunk_size(request.chunk_size)
}

pub fn validate_object_request(request: &ObjectPermissionRequest) -> Result<(), Error> {
    validate_profiles(&request.profiles)?;
    if request.objects.iter().all(|o| o.trim().is_empty()) {
        return Err(Error::validation(
            "at least one object name must be specified",
        ));
    }
    if request.access.is_unspecified() {
        return Err(Error::validation(
            "at least one access flag must be specified",
        ));
    }
    validate_chunk_size(request.chunk_size)
}

pub fn validate_record_type_request(request: &RecordTypeVisibilityRequest) -> Result<(), Error> {
    validate_profiles(&request.profiles)?;
    if request.record_types.is_empty() {
        return Err(Error::validation(
            "at least one record type entry must be specified",
        ));
    }
    for update in &request.record_types {
        update.validate()?;
    }
    validate_chunk_size(request.chunk_size)
}

pub fn validate_assignment_request(request: &AssignmentRequest) -> Result<(), Error> {
    if request.permission_set.trim().is_empty() {
        return Err(Error::validation("a permission set label must be specified"));
    }
    if request.usernames.iter().all(|u| u.trim().is_empty()) {
        return Err(Error::validation(
            "at least one username must be specified",
        ));
    }
    validate_chunk_size(request.chunk_size)
}
