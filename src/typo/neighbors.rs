//! Static neighbor tables used by the substitution and insertion mutations

/// Mapping from a character to its plausible substitutes, in a fixed order.
#[derive(Debug)]
pub struct NeighborTable {
    name: &'static str,
    case_sensitive: bool,
    entries: &'static [(char, &'static [char])],
}

impl NeighborTable {
    pub const fn new(
        name: &'static str,
        case_sensitive: bool,
        entries: &'static [(char, &'static [char])],
    ) -> Self {
        Self {
            name,
            case_sensitive,
            entries,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Substitutes for `c`, or `None` when the table has no entry for it
    pub fn neighbors(&self, c: char) -> Option<&'static [char]> {
        let key = if self.case_sensitive {
            c
        } else {
            c.to_ascii_lowercase()
        };

        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, list)| *list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const KEYBOARD_LETTERS_ENTRIES: &[(char, &[char])] = &[
    ('a', &['q', 'w', 's', 'z']),
    ('b', &['v', 'g', 'h', 'n']),
    ('c', &['x', 'd', 'f', 'v']),
    ('d', &['s', 'e', 'r', 'f', 'c', 'x']),
    ('e', &['r', 'd', 's', 'w']),
    ('f', &['d', 'r', 't', 'g', 'v', 'c']),
    ('g', &['f', 't', 'y', 'h', 'b', 'v']),
    ('h', &['n', 'b', 'g', 'y', 'u', 'j']),
    ('i', &['o', 'k', 'j', 'u']),
    ('j', &['h', 'u', 'i', 'k', 'm', 'n']),
    ('k', &['j', 'i', 'o', 'l', 'm']),
    ('l', &['k', 'o', 'p']),
    ('m', &['n', 'j', 'k']),
    ('n', &['b', 'h', 'j', 'm']),
    ('o', &['i', 'k', 'l', 'p']),
    ('p', &['o', 'l']),
    ('q', &['a', 'w']),
    ('r', &['e', 'd', 'f', 't']),
    ('s', &['a', 'z', 'x', 'd', 'e', 'w']),
    ('t', &['r', 'f', 'g', 'y']),
    ('u', &['y', 'h', 'j', 'i']),
    ('v', &['c', 'f', 'g', 'b']),
    ('w', &['q', 'a', 's', 'd', 'e']),
    ('x', &['z', 's', 'd', 'c']),
    ('y', &['t', 'g', 'h', 'u']),
    ('z', &['a', 's', 'x']),
];

/// QWERTY keyboard adjacency for letters
pub static KEYBOARD_LETTERS: NeighborTable =
    NeighborTable::new("keyboard-letters", false, KEYBOARD_LETTERS_ENTRIES);

const NUMPAD_DIGITS_ENTRIES: &[(char, &[char])] = &[
    ('0', &['1', '2']),
    ('1', &['4', '5', '2', '0']),
    ('2', &['0', '1', '4', '5', '6', '3']),
    ('3', &['2', '5', '6']),
    ('4', &['7', '8', '5', '2', '1']),
    ('5', &['7', '8', '9', '4', '6', '1', '2', '3']),
    ('6', &['9', '8', '5', '2', '3']),
    ('7', &['8', '5', '4']),
    ('8', &['7', '4', '5', '6', '9']),
    ('9', &['8', '5', '6']),
];

/// Numeric keypad adjacency for digits
pub static NUMPAD_DIGITS: NeighborTable =
    NeighborTable::new("numpad-digits", false, NUMPAD_DIGITS_ENTRIES);

const VISUAL_DIGITS_ENTRIES: &[(char, &[char])] = &[
    ('0', &['6', '8', '9']),
    ('1', &['7']),
    ('2', &['7']),
    ('3', &['5', '8', '9']),
    ('4', &['9']),
    ('5', &['3', '8']),
    ('6', &['0', '8']),
    ('7', &['1', '2']),
    ('8', &['0', '3', '5', '6']),
    ('9', &['0', '3', '4']),
];

/// Digits that look alike
pub static VISUAL_DIGITS: NeighborTable =
    NeighborTable::new("visual-digits", true, VISUAL_DIGITS_ENTRIES);

const VISUAL_CHARS_ENTRIES: &[(char, &[char])] = &[
    ('0', &['6', '8', '9', 'o', 'D', 'O', 'U']),
    ('1', &['7', 'I']),
    ('2', &['7', 'Q', 'Z']),
    ('3', &['5', '8', '9']),
    ('4', &['9', 'U']),
    ('5', &['3', '8', 'S']),
    ('6', &['0', '8', 'b', 'G']),
    ('7', &['1', '2', 'T', 'Z']),
    ('8', &['0', '3', '5', '6', 'B', 'S']),
    ('9', &['0', '3', '4', 'g', 'q']),
    ('b', &['6']),
    ('c', &['e']),
    ('e', &['c']),
    ('g', &['9', 'q']),
    ('i', &['I']),
    ('m', &['n']),
    ('n', &['m', 'p']),
    ('o', &['0']),
    ('p', &['n']),
    ('q', &['9', 'g']),
    ('u', &['v']),
    ('v', &['u']),
    ('y', &['z']),
    ('z', &['y']),
    ('B', &['8', 'P']),
    ('C', &['G']),
    ('D', &['0', 'O']),
    ('E', &['F']),
    ('F', &['7', 'E', 'R']),
    ('G', &['6', 'C']),
    ('I', &['1', 'i', 'L', 'T']),
    ('L', &['I']),
    ('M', &['N']),
    ('N', &['M']),
    ('O', &['0', 'D', 'U']),
    ('P', &['B']),
    ('Q', &['2']),
    ('S', &['5', '8']),
    ('T', &['I', '7']),
    ('U', &['0', '4', 'O', 'V']),
    ('V', &['U', 'W']),
    ('W', &['U']),
    ('X', &['Y']),
    ('Y', &['5', 'X']),
    ('Z', &['2', '7']),
];

/// Digits and letters that look alike; upper and lower case are distinct keys
pub static VISUAL_CHARS: NeighborTable =
    NeighborTable::new("visual-chars", true, VISUAL_CHARS_ENTRIES);
