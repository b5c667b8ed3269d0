// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn zero_offset_and_count_selects_all() {
    let pagination = Pagination::from_offset_count(0, 0);
    assert!(!pagination.is_paginated());
    assert_eq!(Pagination::new(), pagination);
}

#[test]
fn zero_count_with_offset_selects_nothing() {
    let pagination = Pagination::from_offset_count(3, 0);
    assert!(pagination.is_paginated());
    assert_eq!(Some(0), pagination.limit);
    assert_eq!(3, pagination.mandatory_offset());
}

#[test]
fn offset_and_count() {
    let pagination = Pagination::from_offset_count(2, 5);
    assert_eq!(5, pagination.mandatory_limit());
    assert_eq!(2, pagination.mandatory_offset());
}

#[test]
fn optional_maps_only_not_found() {
    assert!(matches!(
        RepoResult::<()>::Err(RepoError::NotFound).optional(),
        Ok(None)
    ));
    assert!(matches!(RepoResult::Ok(1).optional(), Ok(Some(1))));
    assert!(matches!(
        RepoResult::<()>::Err(RepoError::Aborted).optional(),
        Err(RepoError::Aborted)
    ));
}

#[test]
fn context_is_only_attached_to_other_errors() {
    let err = RepoError::Other(anyhow::anyhow!("constraint violated"))
        .with_context(|| "failed to insert entry");
    assert_eq!("failed to insert entry", err.to_string());
    let RepoError::Other(err) = err else {
        unreachable!();
    };
    assert_eq!(
        "failed to insert entry: constraint violated",
        format!("{err:#}")
    );

    assert!(
        RepoError::NotFound
            .with_context(|| "failed to load playlist")
            .is_not_found()
    );
    assert!(matches!(
        RepoError::Aborted.with_context(|| "failed to remove entry"),
        RepoError::Aborted
    ));
}
