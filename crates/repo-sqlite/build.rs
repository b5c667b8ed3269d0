// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

fn main() {
    // The schema migrations are embedded at compile time.
    println!("cargo:rerun-if-changed=migrations");
}
