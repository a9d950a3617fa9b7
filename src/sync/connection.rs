// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire legality between two handles.

use crate::model::{Handle, FLOW_INPUT, FLOW_OUTPUT};

/// Whether a wire from `source` to `target` is legal: same schema type, or
/// the reserved flow pair (`flowOutput` into `flowInput`).
///
/// Pure and role-blind: callers are responsible for offering only an output
/// handle as `source` and an input handle as `target`.
pub fn can_connect(source: &Handle, target: &Handle) -> bool {
    if source.schema() == target.schema() {
        return true;
    }
    source.schema() == FLOW_OUTPUT && target.schema() == FLOW_INPUT
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::can_connect;
    use crate::model::{Handle, HandleId};

    fn handle(id: &str, schema: &str) -> Handle {
        Handle::new(
            HandleId::new(id).expect("handle id"),
            "",
            "System",
            schema,
        )
    }

    #[rstest]
    #[case("String", "String", true)]
    #[case("String", "Int32", false)]
    #[case("flowOutput", "flowInput", true)]
    #[case("flowInput", "flowOutput", false)]
    #[case("flowOutput", "flowOutput", true)]
    #[case("Decimal", "String", false)]
    fn connection_truth_table(#[case] source: &str, #[case] target: &str, #[case] legal: bool) {
        assert_eq!(
            can_connect(&handle("h:src", source), &handle("h:dst", target)),
            legal
        );
    }
}
