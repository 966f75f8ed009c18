//! Minnesota: 87 counties and the city table used to place facilities from
//! sources that only report a city (the state's spatial export).
//!
//! Abbreviated saint-prefixes and upper-case spellings are handled by the
//! resolver, but several sources spell the abbreviation inline
//! ("North St. Paul"), so those variants are listed explicitly.

pub const STATE: &str = "MN";

pub const JURISDICTIONS: &[&str] = &[
  "Aitkin",
  "Anoka",
  "Becker",
  "Beltrami",
  "Benton",
  "Big Stone",
  "Blue Earth",
  "Brown",
  "Carlton",
  "Carver",
  "Cass",
  "Chippewa",
  "Chisago",
  "Clay",
  "Clearwater",
  "Cook",
  "Cottonwood",
  "Crow Wing",
  "Dakota",
  "Dodge",
  "Douglas",
  "Faribault",
  "Fillmore",
  "Freeborn",
  "Goodhue",
  "Grant",
  "Hennepin",
  "Houston",
  "Hubbard",
  "Isanti",
  "Itasca",
  "Jackson",
  "Kanabec",
  "Kandiyohi",
  "Kittson",
  "Koochiching",
  "Lac qui Parle",
  "Lake",
  "Lake of the Woods",
  "Le Sueur",
  "Lincoln",
  "Lyon",
  "Mahnomen",
  "Marshall",
  "Martin",
  "McLeod",
  "Meeker",
  "Mille Lacs",
  "Morrison",
  "Mower",
  "Murray",
  "Nicollet",
  "Nobles",
  "Norman",
  "Olmsted",
  "Otter Tail",
  "Pennington",
  "Pine",
  "Pipestone",
  "Polk",
  "Pope",
  "Ramsey",
  "Red Lake",
  "Redwood",
  "Renville",
  "Rice",
  "Rock",
  "Roseau",
  "Scott",
  "Sherburne",
  "Sibley",
  "St. Louis",
  "Stearns",
  "Steele",
  "Stevens",
  "Swift",
  "Todd",
  "Traverse",
  "Wabasha",
  "Wadena",
  "Waseca",
  "Washington",
  "Watonwan",
  "Wilkin",
  "Winona",
  "Wright",
  "Yellow Medicine",
];

pub const CITIES: &[(&str, &str)] = &[
  ("Minneapolis", "Hennepin"),
  ("Bloomington", "Hennepin"),
  ("Brooklyn Park", "Hennepin"),
  ("Brooklyn Center", "Hennepin"),
  ("Plymouth", "Hennepin"),
  ("Maple Grove", "Hennepin"),
  ("Eden Prairie", "Hennepin"),
  ("Edina", "Hennepin"),
  ("Minnetonka", "Hennepin"),
  ("Hopkins", "Hennepin"),
  ("St. Louis Park", "Hennepin"),
  ("Saint Louis Park", "Hennepin"),
  ("Golden Valley", "Hennepin"),
  ("Richfield", "Hennepin"),
  ("Crystal", "Hennepin"),
  ("New Hope", "Hennepin"),
  ("Robbinsdale", "Hennepin"),
  ("Wayzata", "Hennepin"),
  ("Excelsior", "Hennepin"),
  ("Orono", "Hennepin"),
  ("Medina", "Hennepin"),
  ("Long Lake", "Hennepin"),
  ("Osseo", "Hennepin"),
  ("Champlin", "Hennepin"),
  ("Dayton", "Hennepin"),
  ("Rogers", "Hennepin"),
  ("Corcoran", "Hennepin"),
  ("Greenfield", "Hennepin"),
  ("Independence", "Hennepin"),
  ("Loretto", "Hennepin"),
  ("Rockford", "Hennepin"),
  ("St Anthony", "Hennepin"),
  ("St. Anthony", "Hennepin"),
  ("Saint Paul", "Ramsey"),
  ("St. Paul", "Ramsey"),
  ("St Paul", "Ramsey"),
  ("Maplewood", "Ramsey"),
  ("Roseville", "Ramsey"),
  ("White Bear Lake", "Ramsey"),
  ("Shoreview", "Ramsey"),
  ("New Brighton", "Ramsey"),
  ("Vadnais Heights", "Ramsey"),
  ("Mounds View", "Ramsey"),
  ("Arden Hills", "Ramsey"),
  ("Little Canada", "Ramsey"),
  ("North Saint Paul", "Ramsey"),
  ("North St. Paul", "Ramsey"),
  ("North St Paul", "Ramsey"),
  ("Falcon Heights", "Ramsey"),
  ("Lauderdale", "Ramsey"),
  ("White Bear", "Ramsey"),
  ("Gem Lake", "Ramsey"),
  ("Eagan", "Dakota"),
  ("Burnsville", "Dakota"),
  ("Lakeville", "Dakota"),
  ("Apple Valley", "Dakota"),
  ("Hastings", "Dakota"),
  ("Farmington", "Dakota"),
  ("Rosemount", "Dakota"),
  ("Inver Grove Heights", "Dakota"),
  ("South Saint Paul", "Dakota"),
  ("South St. Paul", "Dakota"),
  ("South St Paul", "Dakota"),
  ("West Saint Paul", "Dakota"),
  ("West St. Paul", "Dakota"),
  ("West St Paul", "Dakota"),
  ("Mendota Heights", "Dakota"),
  ("Mendota", "Dakota"),
  ("Lilydale", "Dakota"),
  ("Sunfish Lake", "Dakota"),
  ("Coon Rapids", "Anoka"),
  ("Blaine", "Anoka"),
  ("Fridley", "Anoka"),
  ("Andover", "Anoka"),
  ("Ramsey", "Anoka"),
  ("Ham Lake", "Anoka"),
  ("Lino Lakes", "Anoka"),
  ("Circle Pines", "Anoka"),
  ("Centerville", "Anoka"),
  ("Columbia Heights", "Anoka"),
  ("Spring Lake Park", "Anoka"),
  ("Anoka", "Anoka"),
  ("East Bethel", "Anoka"),
  ("Oak Grove", "Anoka"),
  ("Nowthen", "Anoka"),
  ("Bethel", "Anoka"),
  ("Lexington", "Anoka"),
  ("Hilltop", "Anoka"),
  ("Woodbury", "Washington"),
  ("Cottage Grove", "Washington"),
  ("Stillwater", "Washington"),
  ("Forest Lake", "Washington"),
  ("Hugo", "Washington"),
  ("Oakdale", "Washington"),
  ("Mahtomedi", "Washington"),
  ("Lake Elmo", "Washington"),
  ("Afton", "Washington"),
  ("Bayport", "Washington"),
  ("Newport", "Washington"),
  ("St. Paul Park", "Washington"),
  ("St Paul Park", "Washington"),
  ("Scandia", "Washington"),
  ("Marine on St. Croix", "Washington"),
  ("Dellwood", "Washington"),
  ("Grant", "Washington"),
  ("Denmark", "Washington"),
  ("Willernie", "Washington"),
  ("Landfall", "Washington"),
  ("Shakopee", "Scott"),
  ("Prior Lake", "Scott"),
  ("Savage", "Scott"),
  ("Jordan", "Scott"),
  ("Elko New Market", "Scott"),
  ("New Prague", "Scott"),
  ("Belle Plaine", "Scott"),
  ("Credit River", "Scott"),
  ("Chaska", "Carver"),
  ("Chanhassen", "Carver"),
  ("Waconia", "Carver"),
  ("Victoria", "Carver"),
  ("Norwood Young America", "Carver"),
  ("Watertown", "Carver"),
  ("Mayer", "Carver"),
  ("New Germany", "Carver"),
  ("Cologne", "Carver"),
  ("Carver", "Carver"),
  ("Hamburg", "Carver"),
  ("Elk River", "Sherburne"),
  ("Big Lake", "Sherburne"),
  ("Zimmerman", "Sherburne"),
  ("Becker", "Sherburne"),
  ("Clear Lake", "Sherburne"),
  ("Princeton", "Sherburne"),
  ("Monticello", "Wright"),
  ("Buffalo", "Wright"),
  ("Delano", "Wright"),
  ("Annandale", "Wright"),
  ("Maple Lake", "Wright"),
  ("Otsego", "Wright"),
  ("Albertville", "Wright"),
  ("St. Michael", "Wright"),
  ("St Michael", "Wright"),
  ("Howard Lake", "Wright"),
  ("Waverly", "Wright"),
  ("Montrose", "Wright"),
  ("Hanover", "Wright"),
  ("Clearwater", "Wright"),
  ("Cokato", "Wright"),
  ("Cambridge", "Isanti"),
  ("Isanti", "Isanti"),
  ("Braham", "Isanti"),
  ("North Branch", "Chisago"),
  ("Lindstrom", "Chisago"),
  ("Chisago City", "Chisago"),
  ("Center City", "Chisago"),
  ("Wyoming", "Chisago"),
  ("Stacy", "Chisago"),
  ("Rush City", "Chisago"),
  ("Harris", "Chisago"),
  ("Taylors Falls", "Chisago"),
  ("Rochester", "Olmsted"),
  ("Byron", "Olmsted"),
  ("Stewartville", "Olmsted"),
  ("Oronoco", "Olmsted"),
  ("Chatfield", "Olmsted"),
  ("Eyota", "Olmsted"),
  ("Duluth", "St. Louis"),
  ("Hibbing", "St. Louis"),
  ("Virginia", "St. Louis"),
  ("Eveleth", "St. Louis"),
  ("Ely", "St. Louis"),
  ("Chisholm", "St. Louis"),
  ("Mountain Iron", "St. Louis"),
  ("Hermantown", "St. Louis"),
  ("Proctor", "St. Louis"),
  ("Cloquet", "St. Louis"),
  ("Two Harbors", "Lake"),
  ("Saint Cloud", "Stearns"),
  ("St. Cloud", "Stearns"),
  ("St Cloud", "Stearns"),
  ("Sartell", "Stearns"),
  ("Waite Park", "Stearns"),
  ("Cold Spring", "Stearns"),
  ("Sauk Centre", "Stearns"),
  ("Albany", "Stearns"),
  ("Melrose", "Stearns"),
  ("Paynesville", "Stearns"),
  ("Moorhead", "Clay"),
  ("Dilworth", "Clay"),
  ("Hawley", "Clay"),
  ("Barnesville", "Clay"),
  ("Glyndon", "Clay"),
  ("Mankato", "Blue Earth"),
  ("North Mankato", "Blue Earth"),
  ("Eagle Lake", "Blue Earth"),
  ("Saint Peter", "Nicollet"),
  ("St. Peter", "Nicollet"),
  ("Bemidji", "Beltrami"),
  ("Blackduck", "Beltrami"),
  ("Winona", "Winona"),
  ("Saint Charles", "Winona"),
  ("St. Charles", "Winona"),
  ("Lewiston", "Winona"),
  ("Owatonna", "Steele"),
  ("Medford", "Steele"),
  ("Blooming Prairie", "Steele"),
  ("Austin", "Mower"),
  ("Lyle", "Mower"),
  ("Adams", "Mower"),
  ("Albert Lea", "Freeborn"),
  ("Freeborn", "Freeborn"),
  ("Faribault", "Rice"),
  ("Northfield", "Rice"),
  ("Lonsdale", "Rice"),
  ("Dundas", "Rice"),
  ("Red Wing", "Goodhue"),
  ("Zumbrota", "Goodhue"),
  ("Cannon Falls", "Goodhue"),
  ("Kenyon", "Goodhue"),
  ("Willmar", "Kandiyohi"),
  ("Spicer", "Kandiyohi"),
  ("New London", "Kandiyohi"),
  ("Atwater", "Kandiyohi"),
  ("Hutchinson", "McLeod"),
  ("Glencoe", "McLeod"),
  ("Lester Prairie", "McLeod"),
  ("Winsted", "McLeod"),
  ("Silver Lake", "McLeod"),
  ("Brainerd", "Crow Wing"),
  ("Crosby", "Crow Wing"),
  ("Baxter", "Crow Wing"),
  ("Nisswa", "Crow Wing"),
  ("Pequot Lakes", "Crow Wing"),
  ("Crosslake", "Crow Wing"),
  ("Breezy Point", "Crow Wing"),
  ("Deerwood", "Crow Wing"),
  ("Alexandria", "Douglas"),
  ("Osakis", "Todd"),
  ("Brandon", "Douglas"),
  ("Evansville", "Douglas"),
  ("Garfield", "Douglas"),
  ("Fergus Falls", "Otter Tail"),
  ("Perham", "Otter Tail"),
  ("Pelican Rapids", "Otter Tail"),
  ("Henning", "Otter Tail"),
  ("New York Mills", "Otter Tail"),
  ("Battle Lake", "Otter Tail"),
  ("Wadena", "Otter Tail"),
  ("Detroit Lakes", "Becker"),
  ("Frazee", "Becker"),
  ("Lake Park", "Becker"),
  ("Thief River Falls", "Pennington"),
  ("Grand Rapids", "Itasca"),
  ("Deer River", "Itasca"),
  ("Cohasset", "Itasca"),
  ("Coleraine", "Itasca"),
  ("International Falls", "Koochiching"),
  ("Worthington", "Nobles"),
  ("Marshall", "Lyon"),
  ("Tracy", "Lyon"),
  ("New Ulm", "Brown"),
  ("Springfield", "Brown"),
  ("Sleepy Eye", "Brown"),
  ("Redwood Falls", "Redwood"),
  ("Montevideo", "Chippewa"),
  ("Morris", "Stevens"),
  ("Little Falls", "Morrison"),
  ("Pierz", "Morrison"),
  ("Randall", "Morrison"),
  ("Park Rapids", "Hubbard"),
  ("Walker", "Cass"),
  ("Pine River", "Cass"),
  ("Pillager", "Cass"),
  ("Aitkin", "Aitkin"),
  ("McGregor", "Aitkin"),
  ("Pine City", "Pine"),
  ("Hinckley", "Pine"),
  ("Sandstone", "Pine"),
  ("Mora", "Kanabec"),
  ("Ogilvie", "Kanabec"),
  ("Milaca", "Mille Lacs"),
  ("Onamia", "Mille Lacs"),
  ("Isle", "Mille Lacs"),
  ("Long Prairie", "Todd"),
  ("Staples", "Todd"),
  ("Browerville", "Todd"),
  ("Sauk Rapids", "Benton"),
  ("Foley", "Benton"),
  ("Rice", "Benton"),
  ("Le Sueur", "Le Sueur"),
  ("Le Center", "Le Sueur"),
  ("Montgomery", "Le Sueur"),
  ("Waterville", "Le Sueur"),
  ("Waseca", "Waseca"),
  ("Janesville", "Waseca"),
  ("Blue Earth", "Faribault"),
  ("Wells", "Faribault"),
  ("Fairmont", "Martin"),
  ("Truman", "Martin"),
  ("Jackson", "Jackson"),
  ("Luverne", "Rock"),
  ("Pipestone", "Pipestone"),
  ("Slayton", "Murray"),
  ("Windom", "Cottonwood"),
  ("Granite Falls", "Yellow Medicine"),
  ("Olivia", "Renville"),
  ("Hector", "Renville"),
  ("Benson", "Swift"),
  ("Appleton", "Swift"),
  ("Glenwood", "Pope"),
  ("Starbuck", "Pope"),
  ("Elbow Lake", "Grant"),
  ("Wheaton", "Traverse"),
  ("Ortonville", "Big Stone"),
  ("Madison", "Lac qui Parle"),
  ("Dawson", "Lac qui Parle"),
  ("Crookston", "Polk"),
  ("East Grand Forks", "Polk"),
  ("Fosston", "Polk"),
  ("Warren", "Marshall"),
  ("Ada", "Norman"),
  ("Hallock", "Kittson"),
  ("Roseau", "Roseau"),
  ("Warroad", "Roseau"),
  ("Baudette", "Lake of the Woods"),
  ("Red Lake Falls", "Red Lake"),
  ("Bagley", "Clearwater"),
  ("Mahnomen", "Mahnomen"),
  ("Carlton", "Carlton"),
  ("Moose Lake", "Carlton"),
  ("Silver Bay", "Lake"),
  ("Grand Marais", "Cook"),
  ("Preston", "Fillmore"),
  ("Spring Valley", "Fillmore"),
  ("Lanesboro", "Fillmore"),
  ("Harmony", "Fillmore"),
  ("Caledonia", "Houston"),
  ("Spring Grove", "Houston"),
  ("La Crescent", "Houston"),
  ("Wabasha", "Wabasha"),
  ("Lake City", "Wabasha"),
  ("Plainview", "Wabasha"),
  ("Kasson", "Dodge"),
  ("Mantorville", "Dodge"),
  ("Dodge Center", "Dodge"),
  ("Sibley", "Sibley"),
  ("Gaylord", "Sibley"),
  ("Arlington", "Sibley"),
  ("Henderson", "Sibley"),
  ("Winthrop", "Sibley"),
  ("Ivanhoe", "Lincoln"),
  ("Breckenridge", "Wilkin"),
  ("Saint Michael", "Wright"),
  ("St Louis Park", "Hennepin"),
  ("Avon", "Stearns"),
  ("Saint Joseph", "Stearns"),
  ("Litchfield", "Meeker"),
  ("Lake Crystal", "Blue Earth"),
  ("Pine Island", "Goodhue"),
  ("Saint Francis", "Anoka"),
  ("Elgin", "Wabasha"),
  ("Canby", "Yellow Medicine"),
  ("Holdingford", "Stearns"),
  ("Richmond", "Stearns"),
  ("Freeport", "Stearns"),
  ("Minneota", "Lyon"),
  ("Royalton", "Morrison"),
  ("Edgerton", "Pipestone"),
  ("Cottonwood", "Lyon"),
  ("Esko", "Carlton"),
  ("Saint James", "Watonwan"),
  ("St. James", "Watonwan"),
  ("Saint Bonifacius", "Hennepin"),
  ("Madelia", "Watonwan"),
  ("Saint Clair", "Blue Earth"),
  ("Northome", "Koochiching"),
  ("Grove City", "Meeker"),
  ("Eden Valley", "Meeker"),
  ("Dassel", "Meeker"),
  ("Cosmos", "Meeker"),
  ("Darwin", "Meeker"),
  ("Kingston", "Meeker"),
  ("Watkins", "Meeker"),
  ("Greenwald", "Stearns"),
  ("Kimball", "Stearns"),
  ("Rockville", "Stearns"),
  ("St. Augusta", "Stearns"),
  ("Saint Augusta", "Stearns"),
  ("Bowlus", "Morrison"),
  ("Buckman", "Morrison"),
  ("Genola", "Morrison"),
  ("Harding", "Morrison"),
  ("Lastrup", "Morrison"),
  ("Motley", "Morrison"),
  ("Swanville", "Morrison"),
  ("Upsala", "Morrison"),
  ("Hillman", "Morrison"),
  ("Sobieski", "Morrison"),
  ("Bock", "Mille Lacs"),
  ("Wahkon", "Mille Lacs"),
  ("Pease", "Mille Lacs"),
  ("Foreston", "Mille Lacs"),
  ("Grey Eagle", "Todd"),
  ("West Union", "Todd"),
  ("Clarissa", "Todd"),
  ("Eagle Bend", "Todd"),
  ("Bertha", "Todd"),
  ("Hewitt", "Todd"),
  ("Verndale", "Wadena"),
  ("Menahga", "Wadena"),
  ("Sebeka", "Wadena"),
  ("Nevis", "Hubbard"),
  ("Akeley", "Hubbard"),
  ("Longville", "Cass"),
  ("Hackensack", "Cass"),
  ("Boy River", "Cass"),
  ("Federal Dam", "Cass"),
  ("Remer", "Cass"),
  ("Backus", "Cass"),
  ("Emily", "Crow Wing"),
  ("Fifty Lakes", "Crow Wing"),
  ("Fort Ripley", "Crow Wing"),
  ("Garrison", "Crow Wing"),
  ("Ideal", "Crow Wing"),
  ("Ironton", "Crow Wing"),
  ("Jenkins", "Crow Wing"),
  ("Lake Shore", "Crow Wing"),
  ("Merrifield", "Crow Wing"),
  ("Mission", "Crow Wing"),
  ("Riverton", "Crow Wing"),
  ("Center", "Crow Wing"),
  ("Hill City", "Aitkin"),
  ("Palisade", "Aitkin"),
  ("Tamarack", "Aitkin"),
  ("Tower", "St. Louis"),
  ("Aurora", "St. Louis"),
  ("Babbitt", "St. Louis"),
  ("Buhl", "St. Louis"),
  ("Gilbert", "St. Louis"),
  ("Hoyt Lakes", "St. Louis"),
  ("Kinney", "St. Louis"),
  ("Makinen", "St. Louis"),
  ("Meadowlands", "St. Louis"),
  ("Orr", "St. Louis"),
  ("Soudan", "St. Louis"),
  ("Barnum", "Carlton"),
  ("Cromwell", "Carlton"),
  ("Kettle River", "Carlton"),
  ("Mahtowa", "Carlton"),
  ("Scanlon", "Carlton"),
  ("Thomson", "Carlton"),
  ("Wrenshall", "Carlton"),
  ("Knife River", "Lake"),
  ("Finland", "Lake"),
  ("Schroeder", "Cook"),
  ("Tofte", "Cook"),
  ("Lutsen", "Cook"),
  ("Hovland", "Cook"),
];
