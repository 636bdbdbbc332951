//! Map ids referenced by the built-in save-warp lists.
//!
//! Values follow the generated map group layout (indoor groups per town,
//! Battle Frontier in group 26, link rooms in group 28). Deployments with a
//! different map table override the lists through configuration.

use crate::MapLocation;

pub const OLDALE_TOWN_POKEMON_CENTER_1F: MapLocation = MapLocation::new(2, 2);
pub const OLDALE_TOWN_POKEMON_CENTER_2F: MapLocation = MapLocation::new(2, 3);
pub const DEWFORD_TOWN_POKEMON_CENTER_1F: MapLocation = MapLocation::new(3, 1);
pub const DEWFORD_TOWN_POKEMON_CENTER_2F: MapLocation = MapLocation::new(3, 2);
pub const LAVARIDGE_TOWN_POKEMON_CENTER_1F: MapLocation = MapLocation::new(4, 5);
pub const LAVARIDGE_TOWN_POKEMON_CENTER_2F: MapLocation = MapLocation::new(4, 6);
pub const FALLARBOR_TOWN_POKEMON_CENTER_1F: MapLocation = MapLocation::new(5, 4);
pub const FALLARBOR_TOWN_POKEMON_CENTER_2F: MapLocation = MapLocation::new(5, 5);
pub const VERDANTURF_TOWN_POKEMON_CENTER_1F: MapLocation = MapLocation::new(6, 4);
pub const VERDANTURF_TOWN_POKEMON_CENTER_2F: MapLocation = MapLocation::new(6, 5);
pub const PACIFIDLOG_TOWN_POKEMON_CENTER_1F: MapLocation = MapLocation::new(7, 0);
pub const PACIFIDLOG_TOWN_POKEMON_CENTER_2F: MapLocation = MapLocation::new(7, 1);
pub const PETALBURG_CITY_POKEMON_CENTER_1F: MapLocation = MapLocation::new(8, 4);
pub const PETALBURG_CITY_POKEMON_CENTER_2F: MapLocation = MapLocation::new(8, 5);
pub const SLATEPORT_CITY_POKEMON_CENTER_1F: MapLocation = MapLocation::new(9, 11);
pub const SLATEPORT_CITY_POKEMON_CENTER_2F: MapLocation = MapLocation::new(9, 12);
pub const MAUVILLE_CITY_POKEMON_CENTER_1F: MapLocation = MapLocation::new(10, 5);
pub const MAUVILLE_CITY_POKEMON_CENTER_2F: MapLocation = MapLocation::new(10, 6);
pub const RUSTBORO_CITY_POKEMON_CENTER_1F: MapLocation = MapLocation::new(11, 5);
pub const RUSTBORO_CITY_POKEMON_CENTER_2F: MapLocation = MapLocation::new(11, 6);
pub const FORTREE_CITY_POKEMON_CENTER_1F: MapLocation = MapLocation::new(12, 2);
pub const FORTREE_CITY_POKEMON_CENTER_2F: MapLocation = MapLocation::new(12, 3);
pub const LILYCOVE_CITY_POKEMON_CENTER_1F: MapLocation = MapLocation::new(13, 13);
pub const LILYCOVE_CITY_POKEMON_CENTER_2F: MapLocation = MapLocation::new(13, 14);
pub const MOSSDEEP_CITY_POKEMON_CENTER_1F: MapLocation = MapLocation::new(14, 3);
pub const MOSSDEEP_CITY_POKEMON_CENTER_2F: MapLocation = MapLocation::new(14, 4);
pub const SOOTOPOLIS_CITY_POKEMON_CENTER_1F: MapLocation = MapLocation::new(15, 2);
pub const SOOTOPOLIS_CITY_POKEMON_CENTER_2F: MapLocation = MapLocation::new(15, 3);
pub const EVER_GRANDE_CITY_POKEMON_LEAGUE_1F: MapLocation = MapLocation::new(16, 10);
pub const EVER_GRANDE_CITY_POKEMON_CENTER_1F: MapLocation = MapLocation::new(16, 12);
pub const EVER_GRANDE_CITY_POKEMON_CENTER_2F: MapLocation = MapLocation::new(16, 13);
pub const EVER_GRANDE_CITY_POKEMON_LEAGUE_2F: MapLocation = MapLocation::new(16, 14);
pub const BATTLE_FRONTIER_BATTLE_TOWER_LOBBY: MapLocation = MapLocation::new(26, 1);
pub const BATTLE_FRONTIER_POKEMON_CENTER_1F: MapLocation = MapLocation::new(26, 37);
pub const BATTLE_FRONTIER_POKEMON_CENTER_2F: MapLocation = MapLocation::new(26, 38);
pub const BATTLE_COLOSSEUM_2P: MapLocation = MapLocation::new(28, 0);
pub const TRADE_CENTER: MapLocation = MapLocation::new(28, 1);
pub const RECORD_CORNER: MapLocation = MapLocation::new(28, 2);
pub const BATTLE_COLOSSEUM_4P: MapLocation = MapLocation::new(28, 3);

/// Every Pokémon Center floor, both League floors and the link rooms.
pub const POKECENTER_MAPS: [MapLocation; 38] = [
    OLDALE_TOWN_POKEMON_CENTER_1F,
    OLDALE_TOWN_POKEMON_CENTER_2F,
    DEWFORD_TOWN_POKEMON_CENTER_1F,
    DEWFORD_TOWN_POKEMON_CENTER_2F,
    LAVARIDGE_TOWN_POKEMON_CENTER_1F,
    LAVARIDGE_TOWN_POKEMON_CENTER_2F,
    FALLARBOR_TOWN_POKEMON_CENTER_1F,
    FALLARBOR_TOWN_POKEMON_CENTER_2F,
    VERDANTURF_TOWN_POKEMON_CENTER_1F,
    VERDANTURF_TOWN_POKEMON_CENTER_2F,
    PACIFIDLOG_TOWN_POKEMON_CENTER_1F,
    PACIFIDLOG_TOWN_POKEMON_CENTER_2F,
    PETALBURG_CITY_POKEMON_CENTER_1F,
    PETALBURG_CITY_POKEMON_CENTER_2F,
    SLATEPORT_CITY_POKEMON_CENTER_1F,
    SLATEPORT_CITY_POKEMON_CENTER_2F,
    MAUVILLE_CITY_POKEMON_CENTER_1F,
    MAUVILLE_CITY_POKEMON_CENTER_2F,
    RUSTBORO_CITY_POKEMON_CENTER_1F,
    RUSTBORO_CITY_POKEMON_CENTER_2F,
    FORTREE_CITY_POKEMON_CENTER_1F,
    FORTREE_CITY_POKEMON_CENTER_2F,
    LILYCOVE_CITY_POKEMON_CENTER_1F,
    LILYCOVE_CITY_POKEMON_CENTER_2F,
    MOSSDEEP_CITY_POKEMON_CENTER_1F,
    MOSSDEEP_CITY_POKEMON_CENTER_2F,
    SOOTOPOLIS_CITY_POKEMON_CENTER_1F,
    SOOTOPOLIS_CITY_POKEMON_CENTER_2F,
    EVER_GRANDE_CITY_POKEMON_CENTER_1F,
    EVER_GRANDE_CITY_POKEMON_CENTER_2F,
    EVER_GRANDE_CITY_POKEMON_LEAGUE_1F,
    EVER_GRANDE_CITY_POKEMON_LEAGUE_2F,
    BATTLE_FRONTIER_POKEMON_CENTER_1F,
    BATTLE_FRONTIER_POKEMON_CENTER_2F,
    BATTLE_COLOSSEUM_2P,
    TRADE_CENTER,
    RECORD_CORNER,
    BATTLE_COLOSSEUM_4P,
];

/// Saving here lets the Battle Tower resume a challenge on reload.
pub const RELOAD_MAPS: [MapLocation; 1] = [BATTLE_FRONTIER_BATTLE_TOWER_LOBBY];
