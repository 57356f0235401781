//! Furnace and smelting system.
//!
//! Provides a tick-driven furnace with input/fuel/output slots, the host
//! recipe table it smelts from, and the modifiers an enchanted furnace item
//! carries into the world.

use enchantable_core::item::ids;
use enchantable_core::{EnchantmentType, ItemStack, ItemType};
use serde::{Deserialize, Serialize};

/// Ticks needed to smelt one item without modifiers.
pub const COOK_TIME_TICKS: u16 = 200;

/// Enchantments an enchanted furnace accepts at the anvil.
pub const FURNACE_ENCHANTMENTS: [EnchantmentType; 4] = [
    EnchantmentType::Efficiency,
    EnchantmentType::Unbreaking,
    EnchantmentType::Fortune,
    EnchantmentType::SilkTouch,
];

/// Kind of host recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    /// Crafting grid recipe; never used by furnaces.
    Crafting,
    /// Fuel-independent cooking recipe.
    Smelting,
}

/// A single-input host recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecipe {
    /// Recipe kind.
    pub kind: RecipeKind,
    /// Item consumed.
    pub input: ItemType,
    /// Item produced.
    pub output: ItemType,
}

impl HostRecipe {
    /// Smelting recipe `input -> output`.
    pub const fn smelting(input: ItemType, output: ItemType) -> Self {
        Self {
            kind: RecipeKind::Smelting,
            input,
            output,
        }
    }

    /// Crafting recipe `input -> output`.
    pub const fn crafting(input: ItemType, output: ItemType) -> Self {
        Self {
            kind: RecipeKind::Crafting,
            input,
            output,
        }
    }
}

/// Default host recipes.
pub const DEFAULT_RECIPES: &[HostRecipe] = &[
    HostRecipe::smelting(ItemType::Block(ids::IRON_ORE), ItemType::Item(ids::IRON_INGOT)),
    HostRecipe::smelting(ItemType::Block(ids::GOLD_ORE), ItemType::Item(ids::GOLD_INGOT)),
    HostRecipe::smelting(ItemType::Item(ids::RAW_PORK), ItemType::Item(ids::COOKED_PORK)),
    HostRecipe::smelting(ItemType::Item(ids::RAW_BEEF), ItemType::Item(ids::COOKED_BEEF)),
    HostRecipe::smelting(ItemType::Block(ids::SAND), ItemType::Block(ids::GLASS)),
    HostRecipe::smelting(ItemType::Block(ids::COBBLESTONE), ItemType::Block(ids::STONE)),
    HostRecipe::smelting(ItemType::Item(ids::CLAY_BALL), ItemType::Item(ids::BRICK)),
    HostRecipe::crafting(ItemType::Block(ids::OAK_LOG), ItemType::Block(ids::PLANKS)),
    HostRecipe::crafting(ItemType::Block(ids::PLANKS), ItemType::Item(ids::STICK)),
];

/// The host's global recipe table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeBook {
    recipes: Vec<HostRecipe>,
}

impl Default for RecipeBook {
    fn default() -> Self {
        Self {
            recipes: DEFAULT_RECIPES.to_vec(),
        }
    }
}

impl RecipeBook {
    /// A book with no recipes.
    pub fn empty() -> Self {
        Self {
            recipes: Vec::new(),
        }
    }

    /// Register a recipe.
    pub fn add(&mut self, recipe: HostRecipe) {
        self.recipes.push(recipe);
    }

    /// Every recipe, in registration order.
    pub fn recipes(&self) -> &[HostRecipe] {
        &self.recipes
    }

    /// Smelting recipes only.
    pub fn smelting(&self) -> impl Iterator<Item = &HostRecipe> + '_ {
        self.recipes
            .iter()
            .filter(|r| r.kind == RecipeKind::Smelting)
    }

    /// Output of the first smelting recipe for `input`.
    pub fn smelting_output(&self, input: ItemType) -> Option<ItemType> {
        self.smelting()
            .find(|r| r.input == input)
            .map(|r| r.output)
    }

    /// Whether `input` can plausibly produce `held_output`.
    ///
    /// With an output held, a smelting recipe must map `input` to exactly that
    /// output. With an empty output slot any smelting recipe for `input` will do.
    pub fn can_yield(&self, input: ItemType, held_output: Option<ItemType>) -> bool {
        self.smelting().any(|r| {
            r.input == input && held_output.map_or(true, |output| r.output == output)
        })
    }
}

/// Fuel burn times in ticks.
#[derive(Debug, Clone, Copy)]
pub struct FuelValue {
    /// Fuel item.
    pub item: ItemType,
    /// Ticks one unit burns for.
    pub burn_ticks: u16,
}

/// All valid fuel items and their burn times.
pub const FUEL_VALUES: &[FuelValue] = &[
    FuelValue {
        item: ItemType::Item(ids::COAL),
        burn_ticks: 1600,
    },
    FuelValue {
        item: ItemType::Block(ids::OAK_LOG),
        burn_ticks: 300,
    },
    FuelValue {
        item: ItemType::Block(ids::PLANKS),
        burn_ticks: 100,
    },
    FuelValue {
        item: ItemType::Item(ids::STICK),
        burn_ticks: 50,
    },
];

/// Burn ticks for a fuel item (0 if not valid fuel).
pub fn get_fuel_ticks(item: ItemType) -> u16 {
    FUEL_VALUES
        .iter()
        .find(|f| f.item == item)
        .map(|f| f.burn_ticks)
        .unwrap_or(0)
}

/// Check if an item is valid fuel.
pub fn is_fuel(item: ItemType) -> bool {
    get_fuel_ticks(item) > 0
}

/// Effects an enchanted furnace item carries onto the placed block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnaceModifiers {
    /// Cook speed level (Efficiency).
    pub cook: u8,
    /// Fuel economy level (Unbreaking).
    pub burn: u8,
    /// Bonus output level (Fortune). Bonus rolls are left to the host.
    pub fortune: u8,
    /// Whether the furnace may freeze its burn time (Silk Touch).
    pub can_pause: bool,
}

impl FurnaceModifiers {
    /// Read modifiers from the furnace item being placed.
    ///
    /// `allow_pause` is the world's furnace setting; Silk Touch only makes a
    /// furnace freezable where the world allows it.
    pub fn from_item(item: &ItemStack, allow_pause: bool) -> Self {
        Self {
            cook: item.enchantment_level(EnchantmentType::Efficiency),
            burn: item.enchantment_level(EnchantmentType::Unbreaking),
            fortune: item.enchantment_level(EnchantmentType::Fortune),
            can_pause: allow_pause && item.has_enchantment(EnchantmentType::SilkTouch),
        }
    }

    /// Ticks to smelt one item.
    pub fn cook_ticks(&self) -> u16 {
        (COOK_TIME_TICKS / (1 + u16::from(self.cook))).max(1)
    }

    /// Burn ticks granted by one unit of fuel.
    pub fn fuel_ticks(&self, base: u16) -> u16 {
        let extra = u32::from(base) * u32::from(self.burn) / 4;
        u16::try_from(u32::from(base) + extra).unwrap_or(u16::MAX)
    }
}

/// The burn-time and slot view a freeze controller needs.
pub trait FurnaceDevice {
    /// Remaining live burn time in ticks.
    fn burn_time(&self) -> u16;
    /// Overwrite the live burn time.
    fn set_burn_time(&mut self, ticks: u16);
    /// Kind in the input slot.
    fn input(&self) -> Option<ItemType>;
    /// Kind in the output slot.
    fn output(&self) -> Option<ItemType>;
}

/// State of a furnace in the world.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnaceState {
    /// Item in the input slot (type and count).
    pub input: Option<(ItemType, u32)>,
    /// Item in the fuel slot (type and count).
    pub fuel: Option<(ItemType, u32)>,
    /// Item in the output slot (type and count).
    pub output: Option<(ItemType, u32)>,
    /// Remaining burn time of the current fuel unit.
    pub burn_time: u16,
    /// Ticks spent on the current item.
    pub cook_time: u16,
    /// Modifiers from the furnace item.
    pub modifiers: FurnaceModifiers,
}

impl FurnaceState {
    /// Create a new empty furnace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty furnace with item modifiers.
    pub fn with_modifiers(modifiers: FurnaceModifiers) -> Self {
        Self {
            modifiers,
            ..Self::default()
        }
    }

    /// Whether the furnace is lit.
    pub fn is_lit(&self) -> bool {
        self.burn_time > 0
    }

    /// Advance one tick.
    ///
    /// `may_ignite` gates consuming a new fuel unit; a frozen furnace passes
    /// `false` so it never burns fresh fuel while its time is banked.
    ///
    /// # Returns
    /// `true` if the lit state changed.
    pub fn tick(&mut self, recipes: &RecipeBook, may_ignite: bool) -> bool {
        let was_lit = self.is_lit();
        self.burn_time = self.burn_time.saturating_sub(1);

        let output = self.smelt_output(recipes);
        if self.burn_time == 0 && output.is_some() && may_ignite {
            self.ignite();
        }

        match output {
            Some(output) if self.is_lit() => {
                self.cook_time += 1;
                if self.cook_time >= self.modifiers.cook_ticks() {
                    self.cook_time = 0;
                    self.complete_smelt(output);
                }
            }
            _ => self.cook_time = 0,
        }

        was_lit != self.is_lit()
    }

    /// Output the furnace would produce right now, if it has room.
    pub fn smelt_output(&self, recipes: &RecipeBook) -> Option<ItemType> {
        let (input_type, _) = self.input?;
        let output_type = recipes.smelting_output(input_type)?;
        match self.output {
            None => Some(output_type),
            Some((out_type, out_count))
                if out_type == output_type && out_count < output_type.max_stack_size() =>
            {
                Some(output_type)
            }
            Some(_) => None,
        }
    }

    /// Check if the furnace can smelt (has valid input and room for output).
    pub fn can_smelt(&self, recipes: &RecipeBook) -> bool {
        self.smelt_output(recipes).is_some()
    }

    fn ignite(&mut self) {
        if let Some((fuel_type, fuel_count)) = &mut self.fuel {
            let base = get_fuel_ticks(*fuel_type);
            if base > 0 && *fuel_count > 0 {
                self.burn_time = self.modifiers.fuel_ticks(base);
                *fuel_count -= 1;
                if *fuel_count == 0 {
                    self.fuel = None;
                }
            }
        }
    }

    fn complete_smelt(&mut self, output_type: ItemType) {
        if let Some((_, input_count)) = &mut self.input {
            *input_count -= 1;
            if *input_count == 0 {
                self.input = None;
            }
        }
        match &mut self.output {
            None => self.output = Some((output_type, 1)),
            Some((_, out_count)) => *out_count += 1,
        }
    }

    /// Add an item to the input slot.
    ///
    /// # Returns
    /// Number of items that couldn't be added (0 if all added).
    pub fn add_input(&mut self, item_type: ItemType, count: u32) -> u32 {
        add_to_slot(&mut self.input, item_type, count)
    }

    /// Add an item to the fuel slot.
    ///
    /// # Returns
    /// Number of items that couldn't be added (0 if all added).
    pub fn add_fuel(&mut self, item_type: ItemType, count: u32) -> u32 {
        if !is_fuel(item_type) {
            return count;
        }
        add_to_slot(&mut self.fuel, item_type, count)
    }

    /// Take all items from the output slot.
    pub fn take_output(&mut self) -> Option<(ItemType, u32)> {
        self.output.take()
    }

    /// Take all items from the input slot.
    pub fn take_input(&mut self) -> Option<(ItemType, u32)> {
        self.input.take()
    }

    /// Take all items from the fuel slot.
    pub fn take_fuel(&mut self) -> Option<(ItemType, u32)> {
        self.fuel.take()
    }
}

fn add_to_slot(slot: &mut Option<(ItemType, u32)>, item_type: ItemType, count: u32) -> u32 {
    let max = item_type.max_stack_size();
    match slot {
        None => {
            let add = count.min(max);
            if add > 0 {
                *slot = Some((item_type, add));
            }
            count - add
        }
        Some((existing_type, existing_count)) if *existing_type == item_type => {
            let add = count.min(max.saturating_sub(*existing_count));
            *existing_count += add;
            count - add
        }
        // Slot occupied with a different item
        Some(_) => count,
    }
}

impl FurnaceDevice for FurnaceState {
    fn burn_time(&self) -> u16 {
        self.burn_time
    }

    fn set_burn_time(&mut self, ticks: u16) {
        self.burn_time = ticks;
    }

    fn input(&self) -> Option<ItemType> {
        self.input.map(|(item, _)| item)
    }

    fn output(&self) -> Option<ItemType> {
        self.output.map(|(item, _)| item)
    }
}
