// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document import.
//!
//! Currently this module consumes OpenAPI-3-like JSON delivered by an
//! external loader (file fetch or pasted text).

pub mod openapi;

pub use openapi::{import_from_str, parse_document, ImportError, ImportOptions, UNNAMED_SCHEMA};
