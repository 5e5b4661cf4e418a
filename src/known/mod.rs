//! Curated list of memorable 12-word phrases served to the `known` search strategy.
//!
//! Every entry is exactly twelve words so the list always passes batch validation.

use crate::phrase::{Phrase, ValidationError, validate_batch};

pub static KNOWN_PHRASES: &[&str] = &[
    "chancellor on brink of second bailout for banks and the times wins",
    "the times chancellor on brink of second bailout for banks in london",
    "think different here is to the crazy ones the misfits the rebels",
    "here is to the crazy ones the misfits the rebels the troublemakers",
    "the ones who see things differently are not fond of any rules",
    "a purely peer to peer version of electronic cash would allow payments",
    "online payments sent directly from one party to another without any bank",
    "vires in numeris strength in numbers trust the math not the men",
    "do not trust verify everything you hold your keys your own coins",
    "not your keys not your coins keep your private key secret always",
    "be your own bank hold your own keys and sign your truth",
    "proof of work secures the chain one block at a time daily",
    "every block points back to the genesis block chain of trust unbroken",
    "the root problem with conventional currency is all the trust required now",
    "we have proposed a system for electronic transactions without relying on trust",
    "running bitcoin since the first block hal finney sent the first tweet",
    "stay hungry stay foolish the journey is the reward keep on moving",
    "one more thing the computer for the rest of us is here",
    "simple truth clean code elegant design beautiful mind pure logic wisdom reigns",
    "quantum information geometry reveals hidden structure in every random looking seed phrase",
    "satoshi nakamoto wrote the white paper on halloween in two thousand eight",
    "genesis block mined january third two thousand nine with a secret message",
    "hash the block sign the message verify the key trust the proof",
    "private key public key address wallet seed phrase backup restore recover funds",
    "the quick brown fox jumps over the lazy dog near the river",
    "all that glitters is not gold all who wander are not lost",
    "the only way to do great work is to love what you",
    "innovation distinguishes between a leader and a follower so keep thinking different",
    "your time is limited so do not waste it living someone else",
    "cypherpunks write code we know that someone has to write the software",
    "privacy is necessary for an open society in the electronic age today",
    "crypto anarchy is coming and the state will try to slow it",
    "money is a shared story we tell each other about our trust",
    "sound money fixes this low time preference builds a better future world",
    "stack sats stay humble keep building through the bear market and beyond",
    "hodl through the storm patience beats panic and time heals every wound",
];

/// Validates the curated list into phrases ready for a search session.
pub fn known_phrases() -> Result<Vec<Phrase>, ValidationError> {
    validate_batch(KNOWN_PHRASES).into_phrases()
}
