// cellatlas-data/src/test_utils.rs
//
// Fixtures shared by the unit tests of this crate.

use crate::image_store::ImageStore;
use cellatlas_core::Channel;
use image::{GrayImage, Luma};
use std::path::Path;

/// Side length of the fixture images used by unit tests.
pub(crate) const SIDE: usize = 4;

pub(crate) fn small_store(dir: &Path) -> ImageStore {
    ImageStore::new(dir).with_image_size(SIDE, SIDE)
}

/// Pixel value written for `seed` on `channel` at `(row, col)`.
pub(crate) fn pixel(seed: u8, channel: Channel, row: u32, col: u32) -> u8 {
    seed.wrapping_mul(31)
        .wrapping_add(channel.index() as u8 * 50)
        .wrapping_add((row * 4 + col) as u8)
}

/// Writes the four band images of sample `id`.
pub(crate) fn write_sample(store: &ImageStore, id: &str, seed: u8) {
    for channel in Channel::ALL {
        let img = GrayImage::from_fn(store.cols() as u32, store.rows() as u32, |x, y| {
            Luma([pixel(seed, channel, y, x)])
        });
        img.save(store.path(id, channel))
            .expect("fixture image should be writable");
    }
}

/// Renders an `Id,Target` label file.
pub(crate) fn train_csv(rows: &[(&str, &str)]) -> String {
    let mut csv = String::from("Id,Target\n");
    for (id, target) in rows {
        csv.push_str(&format!("{},{}\n", id, target));
    }
    csv
}
