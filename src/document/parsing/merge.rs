//! Bilingual merge
//!
//! The bulletin prints each Danish entry followed by its English
//! translation. Translations carry no number, so an unnumbered message is
//! folded into the Danish message immediately before it. There is no
//! handling of interleaved or repeated translations: a translation that does
//! not fit its predecessor is dropped.

use tracing::warn;

use super::super::models::*;
use crate::error::MergeError;

/// Fold every English message into the preceding Danish one
pub fn merge_translations(messages: Vec<Message>) -> Vec<Message> {
    let mut result: Vec<Message> = Vec::with_capacity(messages.len());

    for message in messages {
        if message.number.is_some() {
            result.push(message);
            continue;
        }

        let merged = match result.last_mut() {
            Some(danish) => merge_pair(danish, message),
            None => Err(MergeError::NoDanishMessage),
        };
        if let Err(err) = merged {
            let number = result.last().and_then(|m| m.number);
            warn!(error = %err, number = ?number, "Discarding English message");
        }
    }

    result
}

fn check_mergeable(danish: &Message, english: &Message) -> Result<(), MergeError> {
    if danish.descs.len() != 1 || english.descs.len() != 1 {
        return Err(MergeError::LanguageVariants {
            danish: danish.descs.len(),
            english: english.descs.len(),
        });
    }
    if let (Some(da), Some(en)) = (&danish.area, &english.area) {
        if da.depth() != en.depth() {
            return Err(MergeError::AreaDepth {
                danish: da.depth(),
                english: en.depth(),
            });
        }
    }
    if let (Some(da), Some(en)) = (&danish.geometry, &english.geometry) {
        if da.features.len() != en.features.len() {
            return Err(MergeError::FeatureCount {
                danish: da.features.len(),
                english: en.features.len(),
            });
        }
    }
    Ok(())
}

/// Merge an English message into a Danish one
pub fn merge_pair(danish: &mut Message, english: Message) -> Result<(), MergeError> {
    check_mergeable(danish, &english)?;

    let Message {
        descs,
        area,
        geometry,
        ..
    } = english;

    danish.descs.extend(descs);

    if let (Some(da), Some(en)) = (danish.area.as_mut(), area) {
        da.names.extend(en.names);
        if let (Some(da_parent), Some(en_parent)) = (da.parent.as_mut(), en.parent) {
            if da_parent.parent.is_none() {
                da_parent.names.extend(en_parent.names);
            }
        }
    }

    if let (Some(da), Some(en)) = (danish.geometry.as_mut(), geometry) {
        for (da_feature, en_feature) in da.features.iter_mut().zip(en.features) {
            da_feature.properties.extend(en_feature.properties);
        }
    }

    Ok(())
}
