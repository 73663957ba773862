//! Player control marker component
//!
//! Отмечает аватар, которым управляет pointer input (click-to-move).

use bevy::prelude::Component;

/// Marker component для player-controlled аватара
///
/// # Архитектурная заметка
/// - `handle_primary_actions` использует `With<Player>` filter: клики идут только сюда
/// - Door triggers и locomotion monitor работают для ЛЮБОГО `MovementController`
///   (скриптовые аватары без Player тоже проходят door sequence)
///
/// # Single-player
/// Обычно только один entity имеет этот компонент. Если их несколько —
/// клик получают все.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
