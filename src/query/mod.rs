// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the schema store.
//!
//! Lookups resolve refs to live entities; the suggestion builder derives the
//! operation catalogue a schema offers to the canvas.

pub mod lookup;
pub mod suggest;
