//! Maryland: 23 counties plus Baltimore City.
//!
//! The PDF roster carries a county column, so the city table only backs up
//! rows where that column is blank or garbled. Montgomery County is covered in
//! depth; elsewhere only county seats and the largest towns are listed.

pub const STATE: &str = "MD";

pub const JURISDICTIONS: &[&str] = &[
  "Allegany", "Anne Arundel", "Baltimore", "Baltimore City", "Calvert",
  "Caroline", "Carroll", "Cecil", "Charles", "Dorchester", "Frederick",
  "Garrett", "Harford", "Howard", "Kent", "Montgomery", "Prince George's",
  "Queen Anne's", "St. Mary's", "Somerset", "Talbot", "Washington",
  "Wicomico", "Worcester",
];

pub const CITIES: &[(&str, &str)] = &[
  // Montgomery
  ("Rockville", "Montgomery"),
  ("Silver Spring", "Montgomery"),
  ("Bethesda", "Montgomery"),
  ("Gaithersburg", "Montgomery"),
  ("Germantown", "Montgomery"),
  ("Potomac", "Montgomery"),
  ("Olney", "Montgomery"),
  ("Takoma Park", "Montgomery"),
  ("Chevy Chase", "Montgomery"),
  ("Kensington", "Montgomery"),
  ("Wheaton", "Montgomery"),
  ("Damascus", "Montgomery"),
  ("Poolesville", "Montgomery"),
  ("Clarksburg", "Montgomery"),
  ("Burtonsville", "Montgomery"),
  ("Sandy Spring", "Montgomery"),
  ("Montgomery Village", "Montgomery"),
  ("Derwood", "Montgomery"),
  ("Boyds", "Montgomery"),
  ("Brookeville", "Montgomery"),
  // Elsewhere
  ("Baltimore", "Baltimore City"),
  ("Towson", "Baltimore"),
  ("Annapolis", "Anne Arundel"),
  ("Frederick", "Frederick"),
  ("Hagerstown", "Washington"),
  ("Salisbury", "Wicomico"),
  ("Columbia", "Howard"),
  ("Ellicott City", "Howard"),
  ("Bowie", "Prince George's"),
  ("College Park", "Prince George's"),
  ("Upper Marlboro", "Prince George's"),
  ("Bel Air", "Harford"),
  ("Westminster", "Carroll"),
  ("Cumberland", "Allegany"),
  ("Easton", "Talbot"),
  ("Elkton", "Cecil"),
  ("La Plata", "Charles"),
  ("Waldorf", "Charles"),
  ("Leonardtown", "St. Mary's"),
  ("Prince Frederick", "Calvert"),
  ("Ocean City", "Worcester"),
  ("Cambridge", "Dorchester"),
  ("Denton", "Caroline"),
  ("Chestertown", "Kent"),
  ("Centreville", "Queen Anne's"),
  ("Princess Anne", "Somerset"),
  ("Oakland", "Garrett"),
];
