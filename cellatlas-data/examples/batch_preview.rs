//! # Batch preview
//!
//! Loads the train and test splits from the dataset root, builds a stratified
//! train/validation split and prints the shape and class mix of the first few
//! batches.
//!
//! The dataset root is read from `CELLATLAS_DATA_DIR` (default `./data`):
//!
//! `CELLATLAS_DATA_DIR=/path/to/atlas RUST_LOG=info cargo run --example batch_preview`

use cellatlas_data::{
    AtlasPaths, AugmentationConfig, BatchSequence, CellAtlasError, SequenceConfig, TestSet,
    TrainSet,
};

const PREVIEW_BATCHES: usize = 2;

fn main() -> Result<(), CellAtlasError> {
    env_logger::init();

    let paths = AtlasPaths::from_env();
    println!("Dataset root: {}", paths.root().display());

    let train = TrainSet::open(&paths)?;
    let config = SequenceConfig::default()
        .with_seed(42)
        .with_augmentation(AugmentationConfig::flips());
    let (fit, validation) = train.train_test_split(0.8, &config)?;
    println!(
        "Train: {} batches, validation: {} batches",
        fit.length(),
        validation.length()
    );

    for batch in fit.iter().take(PREVIEW_BATCHES) {
        let batch = batch?;
        let counts = batch.labels.class_counts();
        let present: Vec<&str> = counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .filter_map(|(class, _)| train.vocabulary().name(class))
            .collect();
        println!(
            "  images {:?}, labels {:?}, {} classes present: {}",
            batch.images.shape(),
            batch.labels.shape(),
            present.len(),
            present.join(", ")
        );
    }

    let test = TestSet::open(&paths)?;
    let generator = test.get_generator(config.batch_size)?;
    println!("Test: {} samples in {} batches", test.index().len(), generator.length());
    if let Some(first) = generator.iter().next() {
        println!("  first test batch {:?}", first?.shape());
    }
    Ok(())
}
