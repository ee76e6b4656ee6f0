// Copyright (c) 2022 Bastiaan Marinus van de Weerd

mod util;
util::mod_days![18];

fn main() {
	println!("Day 18; part 1: {}, part 2: {}", day18::part1(), day18::part2());
}
