//! Well-known JDK types, used to resolve implicit `java.lang` references and
//! on-demand imports of JDK packages without a classpath.
//!
//! `java.lang` is listed in full. The other tables name the commonly used
//! members of their package; on-demand imports of any `java.`/`javax.`
//! package fall back to [`is_jdk_package`].

const JAVA_LANG: &[&str] = &[
    "AbstractMethodError", "Appendable", "ArithmeticException", "ArrayIndexOutOfBoundsException",
    "ArrayStoreException", "AssertionError", "AutoCloseable", "Boolean", "BootstrapMethodError",
    "Byte", "CharSequence", "Character", "Class", "ClassCastException", "ClassCircularityError",
    "ClassFormatError", "ClassLoader", "ClassNotFoundException", "ClassValue",
    "CloneNotSupportedException", "Cloneable", "Comparable", "Deprecated", "Double", "Enum",
    "EnumConstantNotPresentException", "Error", "Exception", "ExceptionInInitializerError",
    "Float", "FunctionalInterface", "IllegalAccessError", "IllegalAccessException",
    "IllegalArgumentException", "IllegalCallerException", "IllegalMonitorStateException",
    "IllegalStateException", "IllegalThreadStateException", "IncompatibleClassChangeError",
    "IndexOutOfBoundsException", "InheritableThreadLocal", "InstantiationError",
    "InstantiationException", "Integer", "InternalError", "InterruptedException", "Iterable",
    "LayerInstantiationException", "LinkageError", "Long", "MatchException", "Math", "Module",
    "ModuleLayer", "NegativeArraySizeException", "NoClassDefFoundError", "NoSuchFieldError",
    "NoSuchFieldException", "NoSuchMethodError", "NoSuchMethodException", "NullPointerException",
    "Number", "NumberFormatException", "Object", "OutOfMemoryError", "Override", "Package",
    "Process", "ProcessBuilder", "ProcessHandle", "Readable", "Record",
    "ReflectiveOperationException", "Runnable", "Runtime", "RuntimeException",
    "RuntimePermission", "SafeVarargs", "ScopedValue", "SecurityException", "SecurityManager",
    "Short", "StackOverflowError", "StackTraceElement", "StackWalker", "StrictMath", "String",
    "StringBuffer", "StringBuilder", "StringIndexOutOfBoundsException", "StringTemplate",
    "SuppressWarnings", "System", "Thread", "ThreadDeath", "ThreadGroup", "ThreadLocal",
    "Throwable", "TypeNotPresentException", "UnknownError", "UnsatisfiedLinkError",
    "UnsupportedClassVersionError", "UnsupportedOperationException", "VerifyError",
    "VirtualMachineError", "Void", "WrongThreadException",
];

const JAVA_UTIL: &[&str] = &[
    "AbstractCollection", "AbstractList", "AbstractMap", "AbstractQueue",
    "AbstractSequentialList", "AbstractSet", "ArrayDeque", "ArrayList", "Arrays", "Base64",
    "BitSet", "Calendar", "Collection", "Collections", "Comparator",
    "ConcurrentModificationException", "Currency", "Date", "Deque", "Dictionary",
    "DoubleSummaryStatistics", "EnumMap", "EnumSet", "Enumeration", "EventListener",
    "EventObject", "Formatter", "GregorianCalendar", "HashMap", "HashSet", "Hashtable",
    "HexFormat", "IdentityHashMap", "IllegalFormatException", "InputMismatchException",
    "IntSummaryStatistics", "Iterator", "LinkedHashMap", "LinkedHashSet", "LinkedList", "List",
    "ListIterator", "Locale", "LongSummaryStatistics", "Map", "MissingResourceException",
    "NavigableMap", "NavigableSet", "NoSuchElementException", "Objects", "Observable",
    "Observer", "Optional", "OptionalDouble", "OptionalInt", "OptionalLong", "PrimitiveIterator",
    "PriorityQueue", "Properties", "Queue", "Random", "RandomAccess", "ResourceBundle", "Scanner",
    "SequencedCollection", "SequencedMap", "SequencedSet", "ServiceLoader", "Set", "SortedMap",
    "SortedSet", "SplittableRandom", "Spliterator", "Spliterators", "Stack", "StringJoiner",
    "StringTokenizer", "TimeZone", "Timer", "TimerTask", "TreeMap", "TreeSet", "UUID", "Vector",
    "WeakHashMap",
];

const JAVA_UTIL_FUNCTION: &[&str] = &[
    "BiConsumer", "BiFunction", "BiPredicate", "BinaryOperator", "BooleanSupplier", "Consumer",
    "DoubleBinaryOperator", "DoubleConsumer", "DoubleFunction", "DoublePredicate",
    "DoubleSupplier", "DoubleToIntFunction", "DoubleToLongFunction", "DoubleUnaryOperator",
    "Function", "IntBinaryOperator", "IntConsumer", "IntFunction", "IntPredicate", "IntSupplier",
    "IntToDoubleFunction", "IntToLongFunction", "IntUnaryOperator", "LongBinaryOperator",
    "LongConsumer", "LongFunction", "LongPredicate", "LongSupplier", "LongToDoubleFunction",
    "LongToIntFunction", "LongUnaryOperator", "ObjDoubleConsumer", "ObjIntConsumer",
    "ObjLongConsumer", "Predicate", "Supplier", "ToDoubleBiFunction", "ToDoubleFunction",
    "ToIntBiFunction", "ToIntFunction", "ToLongBiFunction", "ToLongFunction", "UnaryOperator",
];

const JAVA_UTIL_CONCURRENT: &[&str] = &[
    "ArrayBlockingQueue", "BlockingDeque", "BlockingQueue", "BrokenBarrierException", "Callable",
    "CancellationException", "CompletableFuture", "CompletionException", "CompletionService",
    "CompletionStage", "ConcurrentHashMap", "ConcurrentLinkedDeque", "ConcurrentLinkedQueue",
    "ConcurrentMap", "ConcurrentNavigableMap", "ConcurrentSkipListMap", "ConcurrentSkipListSet",
    "CopyOnWriteArrayList", "CopyOnWriteArraySet", "CountDownLatch", "CyclicBarrier", "DelayQueue",
    "Delayed", "Exchanger", "ExecutionException", "Executor", "ExecutorCompletionService",
    "ExecutorService", "Executors", "Flow", "ForkJoinPool", "ForkJoinTask", "Future", "FutureTask",
    "LinkedBlockingDeque", "LinkedBlockingQueue", "LinkedTransferQueue", "Phaser",
    "PriorityBlockingQueue", "RecursiveAction", "RecursiveTask", "RejectedExecutionException",
    "RejectedExecutionHandler", "RunnableFuture", "ScheduledExecutorService", "ScheduledFuture",
    "ScheduledThreadPoolExecutor", "Semaphore", "SubmissionPublisher", "SynchronousQueue",
    "ThreadFactory", "ThreadLocalRandom", "ThreadPoolExecutor", "TimeUnit", "TimeoutException",
    "TransferQueue",
];

const JAVA_UTIL_CONCURRENT_ATOMIC: &[&str] = &[
    "AtomicBoolean", "AtomicInteger", "AtomicIntegerArray", "AtomicLong", "AtomicLongArray",
    "AtomicMarkableReference", "AtomicReference", "AtomicReferenceArray", "AtomicStampedReference",
    "DoubleAccumulator", "DoubleAdder", "LongAccumulator", "LongAdder",
];

const JAVA_UTIL_CONCURRENT_LOCKS: &[&str] = &[
    "Condition", "Lock", "LockSupport", "ReadWriteLock", "ReentrantLock", "ReentrantReadWriteLock",
    "StampedLock",
];

const JAVA_UTIL_STREAM: &[&str] = &[
    "BaseStream", "Collector", "Collectors", "DoubleStream", "IntStream", "LongStream", "Stream",
    "StreamSupport",
];

const JAVA_IO: &[&str] = &[
    "BufferedInputStream", "BufferedOutputStream", "BufferedReader", "BufferedWriter",
    "ByteArrayInputStream", "ByteArrayOutputStream", "CharArrayReader", "CharArrayWriter",
    "Closeable", "Console", "DataInputStream", "DataOutputStream", "EOFException",
    "Externalizable", "File", "FileFilter", "FileInputStream", "FileNotFoundException",
    "FileOutputStream", "FileReader", "FileWriter", "FilenameFilter", "FilterInputStream",
    "FilterOutputStream", "Flushable", "IOException", "InputStream", "InputStreamReader",
    "InvalidObjectException", "LineNumberReader", "NotSerializableException", "ObjectInputStream",
    "ObjectOutputStream", "ObjectStreamException", "OutputStream", "OutputStreamWriter",
    "PrintStream", "PrintWriter", "PushbackInputStream", "RandomAccessFile", "Reader", "Serial",
    "Serializable", "StreamTokenizer", "StringReader", "StringWriter", "UncheckedIOException",
    "UnsupportedEncodingException", "Writer",
];

const JAVA_NIO: &[&str] = &[
    "Buffer", "BufferOverflowException", "BufferUnderflowException", "ByteBuffer", "ByteOrder",
    "CharBuffer", "DoubleBuffer", "FloatBuffer", "IntBuffer", "LongBuffer", "MappedByteBuffer",
    "ShortBuffer",
];

const JAVA_NIO_CHARSET: &[&str] = &[
    "CharacterCodingException", "Charset", "CharsetDecoder", "CharsetEncoder",
    "StandardCharsets", "UnsupportedCharsetException",
];

const JAVA_NIO_FILE: &[&str] = &[
    "AccessDeniedException", "CopyOption", "DirectoryNotEmptyException", "DirectoryStream",
    "FileAlreadyExistsException", "FileSystem", "FileSystems", "FileVisitOption",
    "FileVisitResult", "FileVisitor", "Files", "InvalidPathException", "LinkOption",
    "NoSuchFileException", "OpenOption", "Path", "PathMatcher", "Paths", "SimpleFileVisitor",
    "StandardCopyOption", "StandardOpenOption", "WatchEvent", "WatchKey", "WatchService",
];

const JAVA_NET: &[&str] = &[
    "ConnectException", "CookieManager", "DatagramPacket", "DatagramSocket", "HttpCookie",
    "HttpURLConnection", "Inet4Address", "Inet6Address", "InetAddress", "InetSocketAddress",
    "MalformedURLException", "NetworkInterface", "Proxy", "ServerSocket", "Socket",
    "SocketAddress", "SocketException", "SocketTimeoutException", "URI", "URISyntaxException",
    "URL", "URLConnection", "URLDecoder", "URLEncoder", "UnknownHostException",
];

const JAVA_MATH: &[&str] = &["BigDecimal", "BigInteger", "MathContext", "RoundingMode"];

const JAVA_TEXT: &[&str] = &[
    "BreakIterator", "ChoiceFormat", "Collator", "DateFormat", "DecimalFormat",
    "DecimalFormatSymbols", "FieldPosition", "Format", "MessageFormat", "Normalizer",
    "NumberFormat", "ParseException", "ParsePosition", "SimpleDateFormat",
];

const JAVA_TIME: &[&str] = &[
    "Clock", "DateTimeException", "DayOfWeek", "Duration", "Instant", "LocalDate",
    "LocalDateTime", "LocalTime", "Month", "MonthDay", "OffsetDateTime", "OffsetTime", "Period",
    "Year", "YearMonth", "ZoneId", "ZoneOffset", "ZonedDateTime",
];

const JAVA_TIME_FORMAT: &[&str] = &["DateTimeFormatter", "DateTimeParseException", "FormatStyle"];

const JAVA_TIME_TEMPORAL: &[&str] = &[
    "ChronoField", "ChronoUnit", "Temporal", "TemporalAdjuster", "TemporalAdjusters",
    "TemporalAmount", "TemporalUnit",
];

const PACKAGES: &[(&str, &[&str])] = &[
    ("java.lang", JAVA_LANG),
    ("java.util", JAVA_UTIL),
    ("java.util.function", JAVA_UTIL_FUNCTION),
    ("java.util.concurrent", JAVA_UTIL_CONCURRENT),
    ("java.util.concurrent.atomic", JAVA_UTIL_CONCURRENT_ATOMIC),
    ("java.util.concurrent.locks", JAVA_UTIL_CONCURRENT_LOCKS),
    ("java.util.stream", JAVA_UTIL_STREAM),
    ("java.io", JAVA_IO),
    ("java.nio", JAVA_NIO),
    ("java.nio.charset", JAVA_NIO_CHARSET),
    ("java.nio.file", JAVA_NIO_FILE),
    ("java.net", JAVA_NET),
    ("java.math", JAVA_MATH),
    ("java.text", JAVA_TEXT),
    ("java.time", JAVA_TIME),
    ("java.time.format", JAVA_TIME_FORMAT),
    ("java.time.temporal", JAVA_TIME_TEMPORAL),
];

/// Whether `package.simple` is a known JDK type.
pub fn contains(package: &str, simple: &str) -> bool {
    PACKAGES
        .iter()
        .find(|(name, _)| *name == package)
        .is_some_and(|(_, types)| types.contains(&simple))
}

/// `java.lang` is imported implicitly by every unit.
pub fn java_lang(simple: &str) -> Option<String> {
    contains("java.lang", simple).then(|| format!("java.lang.{simple}"))
}

/// Packages shipped with the JDK, whose members are assumed to exist.
pub fn is_jdk_package(package: &str) -> bool {
    package == "java" || package == "javax" || package.starts_with("java.") || package.starts_with("javax.")
}
