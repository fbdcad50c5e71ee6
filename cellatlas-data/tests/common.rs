use cellatlas_data::{Channel, ImageStore};
use image::{GrayImage, Luma};
use std::path::Path;

// Side length of the fixture band images. Small enough to write hundreds of them.
#[allow(dead_code)]
pub(crate) const SIDE: usize = 8;

#[allow(dead_code)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub(crate) fn small_store(dir: &Path) -> ImageStore {
    ImageStore::new(dir).with_image_size(SIDE, SIDE)
}

// Writes the four bands of `id`; every pixel of band `c` holds `value + c`.
#[allow(dead_code)]
pub(crate) fn write_flat_sample(dir: &Path, id: &str, value: u8, side: u32) {
    for channel in Channel::ALL {
        let level = value.wrapping_add(channel.index() as u8);
        let img = GrayImage::from_pixel(side, side, Luma([level]));
        img.save(dir.join(format!("{}_{}.png", id, channel.color())))
            .expect("fixture image should be writable");
    }
}

// 100 targets covering all 28 classes, some samples multi-labelled.
#[allow(dead_code)]
pub(crate) fn hundred_targets() -> Vec<String> {
    (0..100)
        .map(|i| {
            if i % 5 == 0 {
                let mut labels = vec![i % 28, (i / 5) % 28];
                labels.sort_unstable();
                labels.dedup();
                labels
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            } else {
                (i % 28).to_string()
            }
        })
        .collect()
}

#[allow(dead_code)]
pub(crate) fn write_train_csv(path: &Path, ids: &[String], targets: &[String]) {
    let mut csv = String::from("Id,Target\n");
    for (id, target) in ids.iter().zip(targets) {
        csv.push_str(&format!("{},{}\n", id, target));
    }
    std::fs::write(path, csv).expect("fixture csv should be writable");
}
