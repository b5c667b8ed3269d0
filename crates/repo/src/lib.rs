// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use setlist_core::util::clock::UtcDateTimeSecs;

#[macro_use]
mod macros;

pub mod playlist;
pub mod track;

pub type RecordId = i64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordHeader<Id> {
    pub id: Id,
    pub created_at: UtcDateTimeSecs,
    pub updated_at: UtcDateTimeSecs,
}

pub mod prelude {
    use thiserror::Error;

    pub type PaginationOffset = u64;

    pub type PaginationLimit = u64;

    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct Pagination {
        pub limit: Option<PaginationLimit>,
        pub offset: Option<PaginationOffset>,
    }

    impl Pagination {
        #[must_use]
        pub const fn new() -> Self {
            Self {
                limit: None,
                offset: None,
            }
        }

        /// Slice `[offset, offset + count)`
        ///
        /// Both `offset` and `count` being 0 selects everything, i.e.
        /// no pagination at all. Otherwise `count` is the exact limit,
        /// even if 0.
        #[must_use]
        pub const fn from_offset_count(offset: PaginationOffset, count: PaginationLimit) -> Self {
            if offset == 0 && count == 0 {
                return Self::new();
            }
            Self {
                limit: Some(count),
                offset: Some(offset),
            }
        }

        #[must_use]
        pub const fn has_offset(&self) -> bool {
            self.offset.is_some()
        }

        #[must_use]
        pub const fn is_limited(&self) -> bool {
            self.limit.is_some()
        }

        #[must_use]
        pub const fn is_paginated(&self) -> bool {
            self.has_offset() || self.is_limited()
        }

        /// Returns the offset if specified or 0 otherwise.
        #[must_use]
        pub fn mandatory_offset(&self) -> PaginationOffset {
            self.offset.unwrap_or(0)
        }

        /// Returns the limit if specified or the maximum value otherwise.
        #[must_use]
        pub fn mandatory_limit(&self) -> PaginationLimit {
            self.limit.unwrap_or(PaginationLimit::MAX)
        }
    }

    pub trait RecordCollector {
        type Header;
        type Record;

        /// Collect a new element
        fn collect(&mut self, header: Self::Header, record: Self::Record);
    }

    impl<H, R> RecordCollector for Vec<(H, R)> {
        type Header = H;
        type Record = R;

        fn collect(&mut self, header: Self::Header, record: Self::Record) {
            self.push((header, record));
        }
    }

    pub trait ReservableRecordCollector: RecordCollector {
        /// Reserve additional capacity for new elements
        fn reserve(&mut self, additional: usize);
    }

    impl<H, R> ReservableRecordCollector for Vec<(H, R)> {
        fn reserve(&mut self, additional: usize) {
            Vec::reserve(self, additional);
        }
    }

    #[derive(Error, Debug)]
    pub enum RepoError {
        #[error("not found")]
        NotFound,

        #[error("aborted")]
        Aborted,

        #[error(transparent)]
        Other(#[from] anyhow::Error),
    }

    impl RepoError {
        #[must_use]
        pub const fn is_not_found(&self) -> bool {
            matches!(self, Self::NotFound)
        }

        /// Attach context to [`RepoError::Other`]
        ///
        /// `NotFound` and `Aborted` are returned unchanged to keep
        /// them detectable.
        #[must_use]
        pub fn with_context<C, F>(self, context: F) -> Self
        where
            C: std::fmt::Display + Send + Sync + 'static,
            F: FnOnce() -> C,
        {
            match self {
                Self::Other(err) => Self::Other(err.context(context())),
                err => err,
            }
        }
    }

    pub type RepoResult<T> = Result<T, RepoError>;

    pub trait OptionalRepoResult<T> {
        fn optional(self) -> RepoResult<Option<T>>;
    }

    impl<T> OptionalRepoResult<T> for Result<T, RepoError> {
        fn optional(self) -> RepoResult<Option<T>> {
            self.map_or_else(
                |err| {
                    if matches!(err, RepoError::NotFound) {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                },
                |val| Ok(Some(val)),
            )
        }
    }

    #[cfg(test)]
    mod tests;
}
