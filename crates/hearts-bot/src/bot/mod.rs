mod picker;
mod table;

pub use picker::CardPicker;
pub use table::{others_hold_higher, others_hold_lower};

use hearts_core::model::card::Card;

/// Order candidates are scanned in when leading: point value descending,
/// then rank descending.
pub(crate) fn lead_order_key(card: Card) -> (std::cmp::Reverse<u8>, std::cmp::Reverse<u8>) {
    (
        std::cmp::Reverse(card.points()),
        std::cmp::Reverse(card.rank.value()),
    )
}
