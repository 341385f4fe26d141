// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! This module holds constants shared between the log parser and the
//! diagnostic builder, and the environment helpers of the provider

pub mod constants;
pub mod parse_env;
