// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::BinaryImage;

/// An address attributed to the binary image it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFrame<'a> {
    pub image: &'a BinaryImage,
    /// `address - image.address`
    pub offset: u64,
}

/// Finds the image whose `[address, address + size)` range contains
/// `address`.
///
/// Images are scanned in load order and the first match wins; overlapping
/// images are not disambiguated. Images missing their address or size never
/// match.
pub fn resolve(address: u64, images: &[BinaryImage]) -> Option<ResolvedFrame<'_>> {
    images.iter().find_map(|image| {
        image
            .offset_of(address)
            .map(|offset| ResolvedFrame { image, offset })
    })
}
