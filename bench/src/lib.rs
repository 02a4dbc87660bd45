/// Sample program shared by the benchmarks.
pub static MULT: &str = include_str!("../../demos/mult.loop");
