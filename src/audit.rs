//! Advisory per-hand audit dump behind a pluggable sink.
//!
//! The dump is the only diagnostic channel for verification mismatches; the
//! core interface reports a bare verdict. Absence or failure of a sink never
//! changes verdicts.

use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::PathBuf;

use tracing::debug;

use crate::domain::cards;
use crate::session::hand::HandState;

const LOG_TARGET: &str = "verideck::audit";

/// Receives one record per verified hand. Side effect only.
pub trait AuditSink: Send + Sync {
    fn append(&self, record: &AuditRecord<'_>) -> io::Result<()>;
}

/// Discards every record.
pub struct NoAudit;

impl AuditSink for NoAudit {
    fn append(&self, _record: &AuditRecord<'_>) -> io::Result<()> {
        Ok(())
    }
}

/// Borrowed view of a hand at verification time.
pub struct AuditRecord<'a> {
    state: &'a HandState,
}

impl<'a> AuditRecord<'a> {
    pub(crate) fn of(state: &'a HandState) -> Self {
        Self { state }
    }

    /// Render the human-readable dump: hand id, initial hashed deck, per-seat
    /// seeds (hex and ASCII), combined seed, and the shuffled deck annotated
    /// with each revealed card's preimage and a per-card marker.
    pub fn render(&self) -> String {
        let state = self.state;
        let mut out = String::new();

        let _ = writeln!(out, "{}", "-".repeat(68));
        let _ = writeln!(out, "HandId: {}", state.hand_id);
        let _ = writeln!(out, "{}", "-".repeat(68));

        let _ = writeln!(out, "Initial hashed deck:");
        for (i, card) in state.initial_deck.iter().enumerate() {
            let _ = writeln!(out, "{:2}. {}", i + 1, hex::encode(card.as_bytes()));
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Seeds by seat index:");
        let _ = writeln!(
            out,
            "       Seed Hex Representation                                            Seed Text Representation"
        );
        let _ = writeln!(
            out,
            "    -1 {} | ASCII: {} (operator)",
            hex::encode(state.operator.seed.as_bytes()),
            printable_ascii(state.operator.seed.as_bytes())
        );
        for player in &state.players {
            let _ = writeln!(
                out,
                "    {:2} {} | ASCII: {} (Player: {})",
                player.seat,
                hex::encode(player.slot.seed.as_bytes()),
                printable_ascii(player.slot.seed.as_bytes()),
                player.nickname
            );
        }
        let _ = writeln!(out, "    {}", "-".repeat(64));
        let _ = writeln!(
            out,
            "    {} (combined)",
            hex::encode(state.combined_seed.as_bytes())
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "Shuffled hashed deck:");
        let _ = writeln!(
            out,
            "    Card Hash                                                           Card Hex Representation (salt + card)                                       Card Text Representation"
        );
        for (position, card_hash) in state.shuffled_deck.iter().enumerate() {
            let original = state
                .initial_deck
                .iter()
                .position(|h| h == card_hash)
                .map(|i| i + 1)
                .unwrap_or(0);
            let _ = write!(out, "{:2}. {}", original, hex::encode(card_hash.as_bytes()));

            if let Some(reveal) = state.reveals.iter().find(|r| r.position == position) {
                match cards::card_preimage(&reveal.salt, reveal.card) {
                    Some(preimage) => {
                        let ok = cards::check_card(card_hash, &reveal.salt, reveal.card);
                        let _ = write!(
                            out,
                            " <- H({}) | ASCII: {} - {}",
                            hex::encode(&preimage),
                            printable_ascii(&preimage),
                            if ok { "ok" } else { "invalid hash" }
                        );
                    }
                    None => {
                        let _ = write!(out, " <- invalid card byte {}", reveal.card.0);
                    }
                }
            }
            let _ = writeln!(out);
        }

        out
    }
}

/// Appends each record to `<dir>/HandId_<handId>.log`.
pub struct FileAuditSink {
    dir: PathBuf,
}

impl FileAuditSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for FileAuditSink {
    fn default() -> Self {
        Self::new("log_rng")
    }
}

impl AuditSink for FileAuditSink {
    fn append(&self, record: &AuditRecord<'_>) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("HandId_{}.log", record.state.hand_id));
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(record.render().as_bytes())?;
        debug!(target: LOG_TARGET, path = %path.display(), "audit record appended");
        Ok(())
    }
}

fn printable_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if (0x20..0x7f).contains(&b) { b as char } else { '.' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CardPlain, CardReveal, Hash256, Party, Seed256};
    use crate::session::hand::{PartySlot, PlayerState};

    fn verified_hand() -> HandState {
        let players = vec![PlayerState {
            seat: 0,
            nickname: "alice".into(),
            slot: PartySlot {
                hash: Hash256::zero(),
                seed: Seed256::new(*b"0123456789abcdef0123456789abcdef"),
            },
        }];
        let deck = vec![Hash256::new([0xaa; 32]), Hash256::new([0xbb; 32])];
        let mut state = HandState::new(42, Party::Operator, deck.clone(), players);
        state.shuffled_deck = vec![deck[1], deck[0]];
        state.reveals = vec![CardReveal {
            position: 0,
            salt: b"salty".to_vec(),
            card: CardPlain(1),
        }];
        state
    }

    #[test]
    fn render_carries_the_reference_sections() {
        let dump = AuditRecord::of(&verified_hand()).render();
        assert!(dump.contains("HandId: 42"));
        assert!(dump.contains("Initial hashed deck:"));
        assert!(dump.contains("Seeds by seat index:"));
        assert!(dump.contains("(operator)"));
        assert!(dump.contains("(Player: alice)"));
        assert!(dump.contains("(combined)"));
        assert!(dump.contains("Shuffled hashed deck:"));
    }

    #[test]
    fn render_prints_seed_ascii_alongside_hex() {
        let dump = AuditRecord::of(&verified_hand()).render();
        assert!(dump.contains("0123456789abcdef0123456789abcdef (Player: alice)"));
    }

    #[test]
    fn mismatched_reveal_is_marked_invalid() {
        let state = verified_hand();
        let dump = AuditRecord::of(&state).render();
        assert!(dump.contains("invalid hash"));
    }

    #[test]
    fn file_sink_appends_to_the_hand_log() {
        let dir = std::env::temp_dir().join(format!("verideck_audit_{}", std::process::id()));
        let sink = FileAuditSink::new(&dir);
        let state = verified_hand();

        sink.append(&AuditRecord::of(&state)).unwrap();
        sink.append(&AuditRecord::of(&state)).unwrap();

        let path = dir.join("HandId_42.log");
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("HandId: 42").count(), 2);
        fs::remove_dir_all(&dir).unwrap();
    }
}
