//! Seeded random trees that survive a deparse/parse round trip.
//!
//! Generated trees stay inside the lossless subset: names and keys never
//! contain spaces, `=`, `>`, `/` or `<`; values never contain `"`; text data
//! never contains `<`.

use markup::Node;

const NAME_START: &[char] = &['a', 'b', 'c', 'x', 'y', 'z', 'N', '_'];
const NAME_REST: &[char] = &['a', 'e', 'k', 'q', '0', '7', '-', '_', '.', ':'];
const VALUE_CHARS: &[char] = &['v', 'A', '1', ' ', '\'', '>', '=', '/', 'é', '&'];
const DATA_CHARS: &[char] = &['t', 'X', '9', ' ', '\n', '"', '\'', '>', '=', '/', 'ü', '&'];

#[derive(Clone, Copy, Debug)]
pub struct TreeShape {
    pub max_depth: usize,
    pub max_children: usize,
    pub max_attrs: usize,
    pub max_text: usize,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_children: 4,
            max_attrs: 3,
            max_text: 12,
        }
    }
}

pub fn random_tree(seed: u64, shape: TreeShape) -> Node {
    let mut rng = LcgRng::new(seed);
    build(&mut rng, &shape, 0)
}

fn build(rng: &mut LcgRng, shape: &TreeShape, depth: usize) -> Node {
    let mut node = Node::new(random_name(rng));
    for _ in 0..rng.gen_range_usize(0, shape.max_attrs + 1) {
        let key = random_name(rng);
        // Occasionally repeat a key to cover duplicate-key ordering.
        let key = match node.attrs().last() {
            Some(prev) if rng.gen_ratio(1, 5) => prev.key.clone(),
            _ => key,
        };
        let value = random_text(rng, VALUE_CHARS, shape.max_text);
        node.push_attr(key, value);
    }
    if rng.gen_ratio(1, 2) {
        node.set_data(random_text(rng, DATA_CHARS, shape.max_text));
    }
    if depth < shape.max_depth {
        for _ in 0..rng.gen_range_usize(0, shape.max_children + 1) {
            node.push_child(build(rng, shape, depth + 1));
        }
    }
    node
}

fn random_name(rng: &mut LcgRng) -> String {
    let mut name = String::new();
    name.push(NAME_START[rng.gen_index(NAME_START.len())]);
    for _ in 0..rng.gen_range_usize(0, 6) {
        name.push(NAME_REST[rng.gen_index(NAME_REST.len())]);
    }
    name
}

fn random_text(rng: &mut LcgRng, alphabet: &[char], max_len: usize) -> String {
    (0..rng.gen_range_usize(0, max_len + 1))
        .map(|_| alphabet[rng.gen_index(alphabet.len())])
        .collect()
}

struct LcgRng {
    state: u64,
}

impl LcgRng {
    fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // High bits of an LCG are the well-mixed ones.
        self.state >> 33
    }

    fn gen_range_usize(&mut self, start: usize, end: usize) -> usize {
        assert!(start < end, "invalid range: {start}..{end}");
        let span = (end - start) as u64;
        (self.next_u64() % span) as usize + start
    }

    fn gen_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "invalid length: {len}");
        self.gen_range_usize(0, len)
    }

    fn gen_ratio(&mut self, numerator: u32, denominator: u32) -> bool {
        assert!(denominator > 0, "invalid denominator: {denominator}");
        let roll = (self.next_u64() % denominator as u64) as u32;
        roll < numerator
    }
}
