// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grua_domain::CandidateRecord;
use std::future::Future;

use crate::error::CreateError;

/// Creates one persisted record from a validated candidate.
///
/// The import run never has more than one call in flight, so
/// implementations may perform side effects (notifications, derived
/// records) that assume serial creation.
pub trait RecordCreator {
    /// Creates `record`, returning the identifier of the stored record.
    fn create(
        &self,
        record: &CandidateRecord,
    ) -> impl Future<Output = Result<String, CreateError>> + Send;
}
