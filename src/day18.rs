// Copyright (c) 2022 Bastiaan Marinus van de Weerd


const EXPLODE_DEPTH: usize = 4;
const MAX_REGULAR: u32 = 9;


#[cfg_attr(test, derive(Debug))]
#[derive(PartialEq, Eq, Clone)]
enum Element {
	Regular(u32),
	Pair(Box<Pair>),
}

#[cfg_attr(test, derive(Debug))]
#[derive(PartialEq, Eq, Clone)]
struct Pair { left: Element, right: Element }

/// A snailfish number; always a pair at the top level.
#[cfg_attr(test, derive(Debug))]
#[derive(PartialEq, Eq, Clone)]
struct Number(Pair);

#[cfg_attr(test, derive(Debug))]
#[derive(PartialEq, Eq, Clone, Copy)]
enum Action { Explode, Split }

/// Outcome of a single explode or split scan. `Explode` carries the values
/// not yet absorbed by a regular number to the left or right.
enum Reduction {
	Clean,
	Dirty,
	Explode { left: Option<u32>, right: Option<u32> },
	Split,
}

impl Reduction {
	fn carrying(left: Option<u32>, right: Option<u32>) -> Self {
		if left.is_none() && right.is_none() { return Reduction::Dirty }
		Reduction::Explode { left, right }
	}
}


impl Element {
	fn regular_pair(left: u32, right: u32) -> Self {
		Element::Pair(Box::new(Pair { left: Element::Regular(left), right: Element::Regular(right) }))
	}

	fn add_to_leftmost(&mut self, carry: u32) {
		match self {
			Element::Regular(value) => *value += carry,
			Element::Pair(pair) => pair.left.add_to_leftmost(carry),
		}
	}

	fn add_to_rightmost(&mut self, carry: u32) {
		match self {
			Element::Regular(value) => *value += carry,
			Element::Pair(pair) => pair.right.add_to_rightmost(carry),
		}
	}

	/// `depth` is the depth this element would have as a pair.
	fn explode(&mut self, depth: usize) -> Reduction {
		let Element::Pair(pair) = self else { return Reduction::Clean };
		if depth < EXPLODE_DEPTH { return pair.explode(depth) }

		let &Pair { left: Element::Regular(left), right: Element::Regular(right) } = &**pair else {
			panic!("Exploding pair {pair} at depth {depth} does not consist of two regular numbers")
		};
		*self = Element::Regular(0);
		Reduction::Explode { left: Some(left), right: Some(right) }
	}

	fn split(&mut self) -> Reduction {
		if let Element::Regular(value) = *self {
			if value <= MAX_REGULAR { return Reduction::Clean }
			*self = Element::regular_pair(value / 2, value / 2 + value % 2);
			return Reduction::Split
		}
		let Element::Pair(pair) = self else { unreachable!() };
		pair.split()
	}

	fn magnitude(&self) -> u64 {
		match self {
			Element::Regular(value) => *value as u64,
			Element::Pair(pair) => pair.magnitude(),
		}
	}

	fn is_reduced(&self, depth: usize) -> bool {
		match self {
			Element::Regular(value) => *value <= MAX_REGULAR,
			Element::Pair(pair) => depth < EXPLODE_DEPTH && pair.is_reduced(depth),
		}
	}
}

impl Pair {
	/// Explodes the leftmost pair nested inside four pairs, given that `self`
	/// is at `depth`. Carries that cannot be absorbed below are returned.
	fn explode(&mut self, depth: usize) -> Reduction {
		use Reduction::*;

		match self.left.explode(depth + 1) {
			Explode { left, right: Some(carry) } => {
				self.right.add_to_leftmost(carry);
				return Reduction::carrying(left, None)
			}
			Clean => (),
			reduction => return reduction,
		}

		match self.right.explode(depth + 1) {
			Explode { left: Some(carry), right } => {
				self.left.add_to_rightmost(carry);
				Reduction::carrying(None, right)
			}
			reduction => reduction,
		}
	}

	fn split(&mut self) -> Reduction {
		match self.left.split() {
			Reduction::Clean => self.right.split(),
			reduction => reduction,
		}
	}

	fn magnitude(&self) -> u64 {
		3 * self.left.magnitude() + 2 * self.right.magnitude()
	}

	fn is_reduced(&self, depth: usize) -> bool {
		self.left.is_reduced(depth + 1) && self.right.is_reduced(depth + 1)
	}
}

impl Number {
	/// Forms the pair `[self,rhs]` without reducing it.
	fn joined(self, rhs: Self) -> Self {
		Number(Pair { left: Element::Pair(Box::new(self.0)), right: Element::Pair(Box::new(rhs.0)) })
	}

	/// Performs the first applicable action, if any; explosions take
	/// precedence over splits. Carries leaving the outermost pair are dropped.
	fn reduce_step(&mut self) -> Option<Action> {
		if !matches!(self.0.explode(0), Reduction::Clean) { return Some(Action::Explode) }
		if !matches!(self.0.split(), Reduction::Clean) { return Some(Action::Split) }
		None
	}

	/// Returns the number of actions performed.
	fn reduce(&mut self) -> usize {
		let actions = std::iter::from_fn(|| self.reduce_step()).count();
		debug_assert!(self.is_reduced());
		actions
	}

	fn magnitude(&self) -> u64 {
		self.0.magnitude()
	}

	fn is_reduced(&self) -> bool {
		self.0.is_reduced(0)
	}
}

impl Default for Number {
	fn default() -> Self {
		Number(Pair { left: Element::Regular(0), right: Element::Regular(0) })
	}
}

impl std::ops::Add for Number {
	type Output = Number;
	fn add(self, rhs: Self) -> Self::Output {
		let mut sum = self.joined(rhs);
		sum.reduce();
		sum
	}
}

impl std::ops::AddAssign for Number {
	fn add_assign(&mut self, rhs: Self) {
		*self = std::mem::take(self) + rhs;
	}
}

impl std::fmt::Display for Element {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Element::Regular(value) => write!(f, "{value}"),
			Element::Pair(pair) => write!(f, "{pair}"),
		}
	}
}

impl std::fmt::Display for Pair {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[{},{}]", self.left, self.right)
	}
}

impl std::fmt::Display for Number {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}


fn input_numbers_from_str(s: &str) -> impl Iterator<Item = Number> + '_ {
	parsing::numbers_from_str(s).map(|r| r.unwrap())
}

fn input_numbers() -> impl Iterator<Item = Number> {
	input_numbers_from_str(include_str!("day18.txt"))
}


fn part1_impl(input_numbers: impl Iterator<Item = Number>) -> u64 {
	input_numbers.reduce(std::ops::Add::add).unwrap().magnitude()
}

pub(crate) fn part1() -> u64 {
	part1_impl(input_numbers())
}


fn part2_impl(input_numbers: impl Iterator<Item = Number>) -> u64 {
	use {itertools::Itertools as _, rayon::iter::{ParallelBridge as _, ParallelIterator as _}};
	let numbers = input_numbers.collect::<Vec<_>>();
	numbers.iter()
		.permutations(2)
		.par_bridge()
		.map(|pair| (pair[0].clone() + pair[1].clone()).magnitude())
		.max()
		.unwrap_or(0)
}

pub(crate) fn part2() -> u64 {
	part2_impl(input_numbers())
}


mod parsing {
	use {std::{num::ParseIntError, str::FromStr}, either::Either};
	use super::{Element, Pair, Number};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum ElementError {
		Empty { column: usize },
		InvalidByte { column: usize, found: u8 },
		Regular { column: usize, source: ParseIntError },
		Unclosed { column: usize },
		Unopened { column: usize },
		NoSeparator { column: usize },
		Pair(Box<Either<ElementError, ElementError>>),
	}

	/// `column` is where `s` starts in its line.
	fn try_element_from_str(s: &str, column: usize) -> Result<Element, ElementError> {
		use ElementError as E;

		let Some(inner) = s.strip_prefix('[') else {
			if s.is_empty() { return Err(E::Empty { column }) }
			if let Some(p) = s.bytes().position(|b| !b.is_ascii_digit()) {
				return Err(E::InvalidByte { column: column + p, found: s.as_bytes()[p] })
			}
			return s.parse()
				.map(Element::Regular)
				.map_err(|e| E::Regular { column, source: e })
		};
		let inner = inner.strip_suffix(']').ok_or(E::Unclosed { column })?;

		let mut depth = 0_usize;
		let mut separator = None;
		for (i, b) in inner.bytes().enumerate() {
			match b {
				b'[' => depth += 1,
				b']' => depth = depth.checked_sub(1)
					.ok_or(E::Unopened { column: column + 1 + i })?,
				b',' if depth == 0 => { separator = Some(i); break }
				_ => (),
			}
		}
		let separator = separator.ok_or(E::NoSeparator { column })?;

		let left = try_element_from_str(&inner[..separator], column + 1)
			.map_err(|e| E::Pair(Box::new(Either::Left(e))))?;
		let right = try_element_from_str(&inner[separator + 1..], column + 2 + separator)
			.map_err(|e| E::Pair(Box::new(Either::Right(e))))?;
		Ok(Element::Pair(Box::new(Pair { left, right })))
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum NumberError {
		NotAPair,
		Element(ElementError),
	}

	impl FromStr for Number {
		type Err = NumberError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			if !s.starts_with('[') { return Err(NumberError::NotAPair) }
			let Element::Pair(pair) = try_element_from_str(s, 1)
				.map_err(NumberError::Element)? else { unreachable!() };
			Ok(Number(*pair))
		}
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) struct NumbersError { line: usize, source: NumberError }

	pub(super) fn numbers_from_str(s: &str)
	-> impl Iterator<Item = Result<Number, NumbersError>> + '_ {
		s.lines()
			.enumerate()
			.map(|(l, line)| line.parse()
				.map_err(|e| NumbersError { line: l + 1, source: e }))
	}
}


#[test]
fn tests() {
	const INPUT: &str = indoc::indoc! { "
		[[[0,[5,8]],[[1,7],[9,6]]],[[4,[1,2]],[[1,4],2]]]
		[[[5,[2,8]],4],[5,[[9,9],0]]]
		[6,[[[6,2],[5,6]],[[7,6],[4,7]]]]
		[[[6,[0,7]],[0,9]],[4,[9,[9,0]]]]
		[[[7,[6,4]],[3,[1,3]]],[[[5,5],1],9]]
		[[6,[[7,3],[3,2]]],[[[3,8],[5,7]],4]]
		[[[[5,4],[7,7]],8],[[8,3],8]]
		[[9,3],[[9,9],[6,[4,9]]]]
		[[2,[[7,7],7]],[[5,8],[[9,3],[0,2]]]]
		[[[[5,2],5],[8,[3,7]]],[[5,[7,5]],[4,4]]]
	" };
	let sum = input_numbers_from_str(INPUT).reduce(std::ops::Add::add).unwrap();
	assert_eq!(sum.to_string(), "[[[[6,6],[7,6]],[[7,7],[7,0]]],[[[7,7],[7,7]],[[7,8],[9,9]]]]");
	assert_eq!(part1_impl(input_numbers_from_str(INPUT)), 4140);
	assert_eq!(part1(), 4140);
	assert_eq!(part2_impl(input_numbers_from_str(INPUT)), 3993);
	assert_eq!(part2(), 3993);
}
