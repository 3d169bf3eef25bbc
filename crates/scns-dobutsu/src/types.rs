//! 升（Square）・駒種（PieceType）・駒（Piece）

use std::fmt;

use scns_core::Color;

/// 筋の数
pub const FILE_NB: u8 = 3;
/// 段の数
pub const RANK_NB: u8 = 4;

/// 升
///
/// 内部表現は `筋 * 4 + 段`（筋・段ともに 0 始まり）。
/// 表記は USI と同じく筋を数字（1-3）、段を英字（a-d）で書く。
/// 先手は段 a（0）に向かって進む。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// 升の数
    pub const NUM: usize = (FILE_NB * RANK_NB) as usize;

    /// 筋・段から升を作る（盤外なら `None`）
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        if file < FILE_NB && rank < RANK_NB {
            Some(Square(file * RANK_NB + rank))
        } else {
            None
        }
    }

    /// 筋（0 始まり）
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 / RANK_NB
    }

    /// 段（0 始まり）
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 % RANK_NB
    }

    /// 配列アクセス用のインデックス
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 筋・段方向にずらした升（盤外なら `None`）
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file().checked_add_signed(df)?;
        let rank = self.rank().checked_add_signed(dr)?;
        Square::new(file, rank)
    }

    /// 全ての升
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }

    /// USI 形式の 2 文字（例: `2b`）から升を作る
    pub fn from_usi(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let (f, r) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        let file = f.to_digit(10)?.checked_sub(1)?;
        let rank = (r as u32).checked_sub('a' as u32)?;
        Square::new(u8::try_from(file).ok()?, u8::try_from(rank).ok()?)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file() + 1, (b'a' + self.rank()) as char)
    }
}

/// 手番から見た敵陣の最奥段
#[inline]
pub const fn far_rank(color: Color) -> u8 {
    match color {
        Color::Black => 0,
        Color::White => RANK_NB - 1,
    }
}

/// 駒種
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    /// ひよこ
    Chick,
    /// ぞう
    Elephant,
    /// きりん
    Giraffe,
    /// らいおん
    Lion,
    /// にわとり（成ったひよこ）
    Hen,
}

// 先手から見た利き（筋, 段）。段の負方向が前。
const CHICK_STEPS: &[(i8, i8)] = &[(0, -1)];
const ELEPHANT_STEPS: &[(i8, i8)] = &[(-1, -1), (1, -1), (-1, 1), (1, 1)];
const GIRAFFE_STEPS: &[(i8, i8)] = &[(0, -1), (-1, 0), (1, 0), (0, 1)];
const LION_STEPS: &[(i8, i8)] = &[
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
const HEN_STEPS: &[(i8, i8)] = &[(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (0, 1)];

impl PieceType {
    /// 持ち駒になる駒種
    pub const HAND: [PieceType; 3] = [PieceType::Chick, PieceType::Elephant, PieceType::Giraffe];

    /// 持ち駒配列のインデックス（らいおん・にわとりは `None`）
    #[inline]
    pub const fn hand_index(self) -> Option<usize> {
        match self {
            PieceType::Chick => Some(0),
            PieceType::Elephant => Some(1),
            PieceType::Giraffe => Some(2),
            PieceType::Lion | PieceType::Hen => None,
        }
    }

    /// 取られて持ち駒になるときの駒種
    #[inline]
    pub const fn unpromoted(self) -> PieceType {
        match self {
            PieceType::Hen => PieceType::Chick,
            kind => kind,
        }
    }

    /// 先手から見た利き
    #[inline]
    pub const fn steps(self) -> &'static [(i8, i8)] {
        match self {
            PieceType::Chick => CHICK_STEPS,
            PieceType::Elephant => ELEPHANT_STEPS,
            PieceType::Giraffe => GIRAFFE_STEPS,
            PieceType::Lion => LION_STEPS,
            PieceType::Hen => HEN_STEPS,
        }
    }

    /// SFEN の駒文字（先手の大文字）
    #[inline]
    pub const fn to_sfen_char(self) -> char {
        match self {
            PieceType::Chick => 'C',
            PieceType::Elephant => 'E',
            PieceType::Giraffe => 'G',
            PieceType::Lion => 'L',
            PieceType::Hen => 'H',
        }
    }

    /// SFEN の駒文字（大文字・小文字を区別しない）から駒種を得る
    pub const fn from_sfen_char(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'C' => Some(PieceType::Chick),
            'E' => Some(PieceType::Elephant),
            'G' => Some(PieceType::Giraffe),
            'L' => Some(PieceType::Lion),
            'H' => Some(PieceType::Hen),
            _ => None,
        }
    }
}

/// 盤上の駒
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceType) -> Piece {
        Piece { color, kind }
    }

    /// 手番を考慮した利き
    pub fn attack_steps(self) -> impl Iterator<Item = (i8, i8)> {
        let sign = match self.color {
            Color::Black => 1,
            Color::White => -1,
        };
        self.kind.steps().iter().map(move |&(df, dr)| (df, dr * sign))
    }

    /// SFEN の駒文字（先手は大文字、後手は小文字）
    pub const fn to_sfen_char(self) -> char {
        let c = self.kind.to_sfen_char();
        match self.color {
            Color::Black => c,
            Color::White => c.to_ascii_lowercase(),
        }
    }

    /// SFEN の駒文字から駒を得る
    pub const fn from_sfen_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::Black
        } else {
            Color::White
        };
        match PieceType::from_sfen_char(c) {
            Some(kind) => Some(Piece { color, kind }),
            None => None,
        }
    }
}
