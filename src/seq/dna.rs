/// One of the four canonical nucleotides tracked by the composition statistics.
///
/// Anything else (`N`, lowercase soft-masked bases, IUPAC ambiguity codes) has no
/// `Base` and is left out of the per-base counters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Base {
    A,
    C,
    G,
    T,
}

impl Base {
    /// Column order used by every per-base table in this crate.
    pub const ALL: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

    #[inline(always)]
    pub fn from_ascii(b: u8) -> Option<Base> {
        match b {
            b'A' => Some(Base::A),
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            b'T' => Some(Base::T),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}
