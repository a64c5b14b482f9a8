//! FEN parsing and formatting.
//!
//! `Board` implements [`FromStr`] for parsing and [`Display`](fmt::Display)
//! for the reverse direction, so `fen.parse::<Board>()` and
//! `board.to_string()` round-trip.

use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::FenError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl FromStr for Board {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let (pieces, sides) = parse_placement(fields[0])?;
        let side_to_move = parse_active_color(fields[1])?;
        let castling = CastleRights::from_fen(fields[2])?;
        let en_passant = parse_en_passant(fields[3])?;
        let halfmove_clock = parse_counter(fields[4], "halfmove clock")?;
        let fullmove_number = parse_counter(fields[5], "fullmove number")?;

        let board = Board::from_raw(
            pieces,
            sides,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        );
        board.validate()?;
        Ok(board)
    }
}

fn parse_placement(
    field: &str,
) -> Result<([Bitboard; PieceKind::COUNT], [Bitboard; Color::COUNT]), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut pieces = [Bitboard::EMPTY; PieceKind::COUNT];
    let mut sides = [Bitboard::EMPTY; Color::COUNT];

    // FEN lists ranks from 8 down to 1.
    for (rank_index, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_index as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
                continue;
            }
            let piece =
                Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            if file >= 8 {
                return Err(FenError::BadRankLength {
                    rank_index,
                    length: file as usize + 1,
                });
            }
            let sq = Square::from_index_unchecked(rank * 8 + file);
            pieces[piece.kind().index()] |= sq.bitboard();
            sides[piece.color().index()] |= sq.bitboard();
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankLength {
                rank_index,
                length: file as usize,
            });
        }
    }

    Ok((pieces, sides))
}

fn parse_active_color(field: &str) -> Result<Color, FenError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        other => Err(FenError::InvalidColor {
            found: other.to_string(),
        }),
    }
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let sq = Square::from_algebraic(field).ok_or_else(|| FenError::InvalidEnPassant {
        found: field.to_string(),
    })?;
    // Only ranks 3 and 6 can ever be en passant targets.
    if sq.rank() != Rank::Rank3 && sq.rank() != Rank::Rank6 {
        return Err(FenError::InvalidEnPassant {
            found: field.to_string(),
        });
    }
    Ok(Some(sq))
}

fn parse_counter(field: &str, name: &'static str) -> Result<u16, FenError> {
    field.parse().map_err(|_| FenError::InvalidMoveCounter {
        field: name,
        found: field.to_string(),
    })
}

impl fmt::Display for Board {
    /// Formats the position as a FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut empty_run = 0;
            for file in 0u8..8 {
                let sq = Square::from_index_unchecked(rank * 8 + file);
                match self.piece_on(sq) {
                    Some(piece) => {
                        if empty_run > 0 {
                            write!(f, "{empty_run}")?;
                            empty_run = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                write!(f, "{empty_run}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }

        write!(f, " {} {}", self.side_to_move(), self.castling().to_fen())?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
