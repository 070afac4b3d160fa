//! Wire message shapes and codec.
//!
//! The server speaks UTF-8 JSON text frames tagged with a `type` field.
//! Inbound frames decode into the closed [`ServerMessage`] variant set plus
//! an `Unknown` arm for forward compatibility; outbound intents encode from
//! [`ClientCommand`]. Field names follow the wire's camelCase convention.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use game_core::{Coord, Costs, Stage};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("inbound frame is not valid JSON")]
    Frame(#[source] serde_json::Error),

    #[error("inbound message lacks a string `type` tag")]
    MissingTag,

    #[error("malformed `{kind}` payload")]
    Malformed {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode `{kind}` command")]
    Encode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A user roster entry as it appears in `enter` and `load` payloads.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserEntry {
    pub index: i32,
    pub color: String,
}

/// The departing user reference in a `leave` payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct LeaverEntry {
    pub index: i32,
}

/// One cell of the full-grid `load` payload; position is implied by the
/// row-major order of the surrounding arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileCell {
    #[serde(rename = "i")]
    pub owner: i32,
    pub defence: i32,
    pub offence: i32,
    pub productivity: i32,
    pub attack_range: i32,
}

/// One entry of a `changed` batch: explicit position plus the full
/// replacement stat vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSync {
    pub y: usize,
    pub x: usize,
    #[serde(rename = "i")]
    pub owner: i32,
    pub defence: i32,
    pub offence: i32,
    pub productivity: i32,
    pub attack_range: i32,
}

/// Full session snapshot delivered once in response to the load request.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoadPayload {
    pub users: Vec<UserEntry>,
    pub board: Vec<Vec<TileCell>>,
    pub costs: Costs,
    pub me: UserEntry,
    pub energy: i64,
    pub stage: Stage,
    pub age: u64,
}

/// Every inbound message the server is known to send.
///
/// The reducer is a total match over this set; [`ServerMessage::Unknown`] is
/// produced by [`decode`] for unrecognized tags and never fails the session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    Enter {
        newbie: UserEntry,
    },
    Leave {
        leaver: LeaverEntry,
    },
    Load(Box<LoadPayload>),
    Stage {
        stage: Stage,
        age: u64,
        energy: i64,
    },
    Changed {
        data: Vec<TileSync>,
    },
    Energy {
        value: i64,
    },
    Attack {
        from: Coord,
        to: Coord,
        value: i64,
    },
    End {
        /// Final score table, forwarded opaquely; this layer does not
        /// interpret it.
        score: serde_json::Value,
    },
    #[serde(skip)]
    Unknown {
        kind: String,
    },
}

const KNOWN_TYPES: &[&str] = &[
    "enter", "leave", "load", "stage", "changed", "energy", "attack", "end",
];

/// Decodes one inbound text frame.
///
/// A frame that is not JSON, or that lacks a string `type` tag, is a
/// structural error. A known tag with a payload missing required fields is
/// likewise an error so the caller can abort that message without partially
/// applying it. An unrecognized tag decodes to [`ServerMessage::Unknown`].
pub fn decode(raw: &str) -> std::result::Result<ServerMessage, ProtocolError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(ProtocolError::Frame)?;
    let kind = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .ok_or(ProtocolError::MissingTag)?;

    if !KNOWN_TYPES.contains(&kind) {
        return Ok(ServerMessage::Unknown {
            kind: kind.to_owned(),
        });
    }

    let kind = kind.to_owned();
    serde_json::from_value(value).map_err(|source| ProtocolError::Malformed { kind, source })
}

/// Every outbound intent the client can issue. Fire-and-forget: the server
/// never acknowledges these directly; effects arrive later as independent
/// `changed`/`energy` messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientCommand {
    Load,
    New { y: usize, x: usize },
    DefenceUp { y: usize, x: usize },
    OffenceUp { y: usize, x: usize },
    ProductivityUp { y: usize, x: usize },
    AttackRangeUp { y: usize, x: usize },
    Attack { from: Coord, to: Coord },
}

impl ClientCommand {
    /// The wire tag, used for logging and error context.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientCommand::Load => "load",
            ClientCommand::New { .. } => "new",
            ClientCommand::DefenceUp { .. } => "defenceUp",
            ClientCommand::OffenceUp { .. } => "offenceUp",
            ClientCommand::ProductivityUp { .. } => "productivityUp",
            ClientCommand::AttackRangeUp { .. } => "attackRangeUp",
            ClientCommand::Attack { .. } => "attack",
        }
    }

    pub fn encode(&self) -> std::result::Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|source| ProtocolError::Encode {
            kind: self.kind(),
            source,
        })
    }
}
