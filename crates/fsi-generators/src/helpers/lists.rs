//! Representative text lists used by the generators.

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Christopher", "Karen", "Daniel", "Lisa", "Matthew", "Nancy", "Anthony", "Betty", "Mark",
    "Sandra", "Luis", "Ashley", "Wei", "Priya", "Carlos", "Aisha", "Hiroshi", "Fatima", "Ivan",
    "Mei", "Omar", "Sofia",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Nguyen", "Patel", "Kim", "Chen", "O'Brien",
    "Kowalski", "Okafor", "Yamamoto", "Schmidt", "Rossi",
];

pub const STREET_NAMES: &[&str] = &[
    "Main", "Oak", "Pine", "Maple", "Cedar", "Elm", "Washington", "Lake", "Hill", "Park",
    "Sunset", "Ridge", "Church", "Walnut", "Highland", "Meadow", "Forest", "River", "Spring",
    "Willow",
];

pub const STREET_SUFFIXES: &[&str] = &["St", "Ave", "Blvd", "Rd", "Ln", "Dr", "Ct", "Way", "Pl"];

/// `(city, state, ZIP prefix)`
pub const CITIES: &[(&str, &str, &str)] = &[
    ("New York", "NY", "100"),
    ("Buffalo", "NY", "142"),
    ("Los Angeles", "CA", "900"),
    ("San Francisco", "CA", "941"),
    ("San Diego", "CA", "921"),
    ("Chicago", "IL", "606"),
    ("Houston", "TX", "770"),
    ("Dallas", "TX", "752"),
    ("Austin", "TX", "787"),
    ("Phoenix", "AZ", "850"),
    ("Philadelphia", "PA", "191"),
    ("Pittsburgh", "PA", "152"),
    ("Miami", "FL", "331"),
    ("Orlando", "FL", "328"),
    ("Atlanta", "GA", "303"),
    ("Charlotte", "NC", "282"),
    ("Seattle", "WA", "981"),
    ("Denver", "CO", "802"),
    ("Boston", "MA", "021"),
    ("Columbus", "OH", "432"),
    ("Detroit", "MI", "482"),
    ("Minneapolis", "MN", "554"),
    ("Nashville", "TN", "372"),
    ("Portland", "OR", "972"),
];

/// `(merchant, merchant category code)`
pub const MERCHANTS: &[(&str, &str)] = &[
    ("Whole Foods Market", "5411"),
    ("Kroger", "5411"),
    ("Safeway", "5411"),
    ("Shell", "5541"),
    ("Chevron", "5541"),
    ("ExxonMobil", "5541"),
    ("Amazon.com", "5942"),
    ("Target", "5310"),
    ("Walmart", "5310"),
    ("Costco", "5300"),
    ("Home Depot", "5200"),
    ("Starbucks", "5814"),
    ("McDonald's", "5814"),
    ("Chipotle", "5814"),
    ("Olive Garden", "5812"),
    ("Delta Air Lines", "3058"),
    ("United Airlines", "3000"),
    ("Marriott", "3509"),
    ("Uber", "4121"),
    ("Netflix", "4899"),
    ("Verizon Wireless", "4814"),
    ("CVS Pharmacy", "5912"),
    ("Walgreens", "5912"),
    ("Best Buy", "5732"),
];

pub const COMPANY_WORDS: &[&str] = &[
    "Summit", "Pinnacle", "Harbor", "Keystone", "Evergreen", "Blue Ridge", "Ironwood",
    "Lakeside", "Northstar", "Granite", "Riverbend", "Meridian", "Beacon", "Cascade", "Liberty",
    "Sterling", "Oakmont", "Prairie", "Redwood", "Atlas",
];

pub const COMPANY_NOUNS: &[&str] = &[
    "Holdings", "Partners", "Group", "Capital", "Industries", "Solutions", "Services",
    "Enterprises", "Logistics", "Ventures", "Trading", "Supply",
];

pub const COMPANY_SUFFIXES: &[&str] = &["Inc.", "LLC", "Corp.", "Co.", "L.P.", "Ltd."];

pub const DEPARTMENTS: &[&str] = &[
    "Finance", "Treasury", "Risk Management", "Compliance", "Internal Audit", "Operations",
    "Information Technology", "Human Resources", "Legal", "Retail Banking",
    "Commercial Lending", "Wealth Management", "Marketing", "Customer Service",
    "Mortgage Servicing", "Collections",
];

/// `(NAICS code, industry)`
pub const NAICS_INDUSTRIES: &[(&str, &str)] = &[
    ("236115", "Residential Construction"),
    ("238220", "Plumbing and HVAC Contractors"),
    ("311811", "Retail Bakeries"),
    ("423430", "Computer Equipment Wholesale"),
    ("441110", "New Car Dealers"),
    ("445110", "Grocery Stores"),
    ("448140", "Family Clothing Stores"),
    ("484121", "General Freight Trucking"),
    ("531210", "Real Estate Agents and Brokers"),
    ("541110", "Offices of Lawyers"),
    ("541211", "Offices of CPAs"),
    ("541511", "Custom Computer Programming"),
    ("541810", "Advertising Agencies"),
    ("561720", "Janitorial Services"),
    ("621111", "Offices of Physicians"),
    ("621210", "Offices of Dentists"),
    ("713940", "Fitness Centers"),
    ("722511", "Full-Service Restaurants"),
    ("811111", "General Automotive Repair"),
    ("812112", "Beauty Salons"),
];

pub const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com", "yahoo.com", "outlook.com", "icloud.com", "hotmail.com", "aol.com",
    "proton.me",
];

/// `(bank code, bank)` for Mexican CLABE numbers.
pub const MEXICAN_BANKS: &[(&str, &str)] = &[
    ("002", "Banamex"),
    ("012", "BBVA Mexico"),
    ("014", "Santander"),
    ("021", "HSBC"),
    ("036", "Inbursa"),
    ("072", "Banorte"),
];

/// Foreign supplier names for international payees.
pub const FOREIGN_SUPPLIERS: &[&str] = &[
    "Textiles del Norte", "Agroindustrias Bajio", "Maple Leaf Components", "Rhein Maschinenbau",
    "Shenzhen Brightway Electronics", "Lumiere Imports", "Bharat Precision Tools",
    "Distribuidora Pacifico", "Northern Timber Supply", "Osaka Fine Goods",
];
