// Static knowledge: topic keyword -> canned explanation.
//
// Lookup is a substring test against the whole query, in declaration order,
// so earlier (shorter) keywords shadow later ones that contain them.
// "rest api" is never reached because "api" matches first. That ordering is
// part of the observable behavior; don't sort this table.

const AI: &str = "Artificial Intelligence (AI) refers to computer systems designed to perform tasks that typically require human intelligence, such as visual perception, speech recognition, decision-making, and language translation. AI systems learn from experience, adjust to new inputs, and perform human-like tasks.";

pub const KNOWLEDGE: &[(&str, &str)] = &[
    // AI & machine learning
    ("ai", AI),
    ("artificial intelligence", AI),
    ("machine learning", "Machine Learning is a subset of AI where systems learn from data and improve their performance over time without being explicitly programmed. It uses algorithms to identify patterns in data and make predictions or decisions based on those patterns."),
    ("deep learning", "Deep Learning is a subset of machine learning using neural networks with multiple layers (deep neural networks) to learn hierarchical representations of data. It's particularly effective for image recognition, natural language processing, and complex pattern recognition."),
    ("neural network", "A neural network is a computing system inspired by biological neural networks, consisting of interconnected nodes (neurons) organized in layers. Each connection has a weight that adjusts as learning proceeds, allowing the network to recognize patterns and make predictions."),
    // Programming languages
    ("python", "Python is a high-level, interpreted programming language known for its simplicity, readability, and versatility. Created by Guido van Rossum in 1991, it's widely used in data science, web development, automation, artificial intelligence, and scientific computing."),
    ("javascript", "JavaScript is a high-level, interpreted programming language primarily used for web development to create interactive and dynamic web pages. It runs in web browsers and can also be used on servers through Node.js."),
    ("java", "Java is a class-based, object-oriented programming language designed to have minimal implementation dependencies. It follows the principle of 'write once, run anywhere' (WORA), meaning compiled Java code can run on any platform that supports Java."),
    // Web & APIs
    ("api", "An API (Application Programming Interface) is a set of rules, protocols, and tools that allows different software applications to communicate with each other. It defines the methods and data formats that applications can use to request and exchange information."),
    ("rest api", "REST (Representational State Transfer) API is an architectural style for designing networked applications. It uses HTTP requests to access and manipulate data, typically using GET, POST, PUT, and DELETE operations."),
    // Data
    ("database", "A database is an organized collection of structured data stored electronically in a computer system. It's typically controlled by a database management system (DBMS) that allows users to create, read, update, and delete data efficiently."),
    ("sql", "SQL (Structured Query Language) is a standardized programming language used for managing and manipulating relational databases. It's used to perform tasks such as querying data, updating records, and creating database structures."),
    ("cloud computing", "Cloud computing delivers computing services (servers, storage, databases, networking, software) over the internet ('the cloud'), allowing flexible resources, faster innovation, and economies of scale. Users typically pay only for the cloud services they use."),
    ("data science", "Data Science is an interdisciplinary field that combines statistics, programming, and domain expertise to extract insights and knowledge from structured and unstructured data. It involves data collection, cleaning, analysis, visualization, and interpretation."),
    // Programming concepts
    ("algorithm", "An algorithm is a step-by-step procedure or formula for solving a problem or completing a task. It's a finite sequence of well-defined instructions that can be implemented in code to achieve a specific outcome."),
    ("function", "A function is a reusable block of code that performs a specific task. It can accept inputs (parameters), process them, and return outputs. Functions help organize code, reduce repetition, and improve maintainability."),
    ("variable", "A variable is a named storage location in computer memory that holds a value which can change during program execution. It has a name, a data type, and a value that can be read or modified."),
    ("loop", "A loop is a programming construct that repeats a block of code multiple times until a specified condition is met. Common types include for loops, while loops, and do-while loops."),
    // Hardware
    ("cpu", "The CPU (Central Processing Unit) is the primary component of a computer that executes instructions and performs calculations. Often called the 'brain' of the computer, it processes data and controls other hardware components."),
    ("ram", "RAM (Random Access Memory) is volatile memory that temporarily stores data and programs currently being used by the computer. It provides fast read and write access, but loses its contents when power is turned off."),
    ("gpu", "The GPU (Graphics Processing Unit) is a specialized processor originally designed for rendering graphics. Modern GPUs are also used for parallel computations in AI, scientific simulations, and cryptocurrency mining due to their ability to process many operations simultaneously."),
    // Science & mathematics
    ("physics", "Physics is the natural science that studies matter, energy, and the fundamental forces of nature. It seeks to understand how the universe behaves through observation, experimentation, and mathematical analysis. Major branches include mechanics, thermodynamics, electromagnetism, and quantum physics."),
    ("chemistry", "Chemistry is the scientific study of matter, its properties, composition, structure, and the changes it undergoes during chemical reactions. It explores how substances interact, combine, and transform at the molecular and atomic level."),
    ("biology", "Biology is the scientific study of life and living organisms, including their structure, function, growth, evolution, distribution, and taxonomy. It encompasses diverse fields from molecular biology to ecology."),
    ("mathematics", "Mathematics is the abstract science of numbers, quantity, structure, space, and change. It uses logic and symbolic notation to study patterns, relationships, and properties through rigorous proof and reasoning."),
];

/// First entry whose keyword appears anywhere in `query`.
pub fn lookup(query: &str) -> Option<(&'static str, &'static str)> {
    let query = query.to_lowercase();
    KNOWLEDGE
        .iter()
        .find(|(keyword, _)| query.contains(keyword))
        .copied()
}
