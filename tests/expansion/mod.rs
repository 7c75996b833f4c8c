// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end expansion scenarios, grouped by outer frequency.

mod monthly;
mod weekly;
