#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Solvation;
#[allow(non_snake_case)]
pub mod Utils;
pub mod settings;

use Examples::solvation_examples::solvation_examples;
use Utils::logger::init_logger;
use log::LevelFilter;

pub fn main() {
    init_logger(LevelFilter::Info);
    let task: usize = 0;
    solvation_examples(task);
}
